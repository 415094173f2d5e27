//! CLI 命令处理模块

pub mod bitrot;
pub mod misc;
pub mod output;
pub mod peer;
pub mod quota;
pub mod volume;
