//! Gluster 数据模型
//!
//! 所有模型都是某一时刻集群状态的解析结果，构造后不再修改。

mod peer;
mod volume;

pub use peer::{Peer, State};
pub use volume::{
    BitrotOption, Brick, BrickStatus, DaemonStatus, GlusterOption, LimitExceeded, OptionKey,
    Quota, ScrubControl, ScrubFrequency, ScrubThrottle, Transport, Volume, VolumeStatus,
    VolumeTranslator, VolumeType,
};
