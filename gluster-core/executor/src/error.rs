//! 执行器错误定义

use thiserror::Error;

/// 执行器操作结果类型
pub type Result<T> = std::result::Result<T, ExecError>;

/// 执行器错误类型
#[derive(Error, Debug)]
pub enum ExecError {
    /// 进程无法启动（命令不存在、权限不足等）
    #[error("启动进程失败: {0}")]
    SpawnError(String),

    /// 进程以非零退出码结束，携带原始错误输出
    #[error("命令执行失败 (退出码 {code:?}): {message}")]
    NonZeroExit {
        /// 退出码（被信号终止时为 None）
        code: Option<i32>,
        /// 捕获到的错误输出
        message: String,
    },

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExecError {
    /// 获取工具原始错误输出（仅非零退出时存在）
    pub fn tool_message(&self) -> Option<&str> {
        match self {
            ExecError::NonZeroExit { message, .. } => Some(message),
            _ => None,
        }
    }
}
