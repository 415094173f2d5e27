//! 本地命令执行实现
//!
//! 使用 tokio 进程执行 gluster 命令，按需加上提权命令与脚本模式参数

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::{ExecError, Result};

/// 命令执行输出
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// 标准输出
    pub stdout: String,
    /// 标准错误
    pub stderr: String,
    /// 退出码
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// 检查命令是否成功执行
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 获取错误输出（stderr 为空时退回 stdout）
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }

    /// 成功时返回标准输出，否则转换为 [`ExecError::NonZeroExit`]
    pub fn into_result(self) -> Result<String> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(ExecError::NonZeroExit {
                code: self.exit_code,
                message: self.error_text().to_string(),
            })
        }
    }
}

/// 命令执行接口
///
/// 所有集群操作都通过该接口运行外部命令，便于在测试中替换。
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 执行命令并返回标准输出
    ///
    /// # Arguments
    /// * `command` - 可执行文件（如 `gluster`）
    /// * `args` - 参数列表
    /// * `as_root` - 是否提权执行
    /// * `script_mode` - 是否使用脚本模式（跳过交互确认）
    async fn run(
        &self,
        command: &str,
        args: &[String],
        as_root: bool,
        script_mode: bool,
    ) -> Result<String>;
}

/// 本地进程执行器
#[derive(Debug, Clone, Default)]
pub struct LocalRunner {
    config: ExecutorConfig,
}

impl LocalRunner {
    /// 创建执行器
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// 组装完整的参数向量，第一个元素为实际启动的程序
    pub fn build_argv(
        &self,
        command: &str,
        args: &[String],
        as_root: bool,
        script_mode: bool,
    ) -> Vec<String> {
        let mut argv = Vec::with_capacity(args.len() + 3);

        if as_root {
            if let Some(privilege) = self.config.privilege() {
                argv.push(privilege.to_string());
            }
        }
        argv.push(command.to_string());
        if script_mode {
            argv.push(self.config.script_mode_flag.clone());
        }
        argv.extend(args.iter().cloned());

        argv
    }

    /// 执行命令并捕获全部输出
    pub async fn execute(
        &self,
        command: &str,
        args: &[String],
        as_root: bool,
        script_mode: bool,
    ) -> Result<CommandOutput> {
        let argv = self.build_argv(command, args, as_root, script_mode);
        debug!("执行命令: {}", argv.join(" "));

        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| ExecError::SpawnError("空命令".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| ExecError::SpawnError(format!("{}: {}", program, e)))?;

        let output = child.wait_with_output().await?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        debug!(
            "命令执行完成, 退出码: {:?}, stdout 长度: {}, stderr 长度: {}",
            result.exit_code,
            result.stdout.len(),
            result.stderr.len()
        );

        Ok(result)
    }
}

#[async_trait]
impl CommandRunner for LocalRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        as_root: bool,
        script_mode: bool,
    ) -> Result<String> {
        self.execute(command, args, as_root, script_mode)
            .await?
            .into_result()
    }
}
