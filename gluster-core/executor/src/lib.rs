//! Gluster 命令执行器
//!
//! 以本地进程方式执行 gluster CLI，支持：
//! - 通过 sudo 提权执行
//! - 脚本模式（`--mode=script`，跳过交互确认）
//! - 捕获标准输出，非零退出码原样返回错误输出
//!
//! 执行器只负责运行命令，不解释输出；输出的解析由调用方完成。
//! 每次调用只执行一次，不做重试，也不设超时。
//!
//! # 示例
//!
//! ```ignore
//! use gluster_executor::{CommandRunner, ExecutorConfig, LocalRunner};
//!
//! let runner = LocalRunner::new(ExecutorConfig::default());
//! let args = vec!["peer".to_string(), "status".to_string(), "--xml".to_string()];
//! let xml = runner.run("gluster", &args, true, false).await?;
//! ```

mod config;
mod error;
mod runner;

pub use config::ExecutorConfig;
pub use error::{ExecError, Result};
pub use runner::{CommandOutput, CommandRunner, LocalRunner};
