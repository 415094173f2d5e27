//! gluster 命令行调用

use std::sync::Arc;

use gluster_executor::CommandRunner;
use tracing::debug;

use crate::error::Result;

/// 默认的 gluster 可执行文件
pub const DEFAULT_BINARY: &str = "gluster";

/// 对 [`CommandRunner`] 的薄封装，所有调用都以 root 执行
#[derive(Clone)]
pub(crate) struct GlusterCli {
    runner: Arc<dyn CommandRunner>,
    binary: String,
}

impl GlusterCli {
    pub(crate) fn new(runner: Arc<dyn CommandRunner>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// 查询类命令（带 `--xml`，非脚本模式）
    pub(crate) async fn query(&self, args: Vec<String>) -> Result<String> {
        self.run(args, false).await
    }

    /// 变更类命令
    pub(crate) async fn run(&self, args: Vec<String>, script_mode: bool) -> Result<String> {
        debug!(
            "执行: {} {} (script_mode={})",
            self.binary,
            args.join(" "),
            script_mode
        );
        let output = self.runner.run(&self.binary, &args, true, script_mode).await?;
        Ok(output)
    }
}

/// 构造参数列表
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($arg.to_string()),*]
    };
}

pub(crate) use args;
