//! 执行器配置

use serde::{Deserialize, Serialize};

/// 执行器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// gluster 可执行文件（默认 `gluster`）
    #[serde(default = "default_binary")]
    pub binary: String,
    /// 提权命令（默认 `sudo`，为空字符串时直接执行）
    #[serde(default = "default_privilege_command")]
    pub privilege_command: String,
    /// 脚本模式参数
    #[serde(default = "default_script_mode_flag")]
    pub script_mode_flag: String,
}

fn default_binary() -> String {
    "gluster".to_string()
}

fn default_privilege_command() -> String {
    "sudo".to_string()
}

fn default_script_mode_flag() -> String {
    "--mode=script".to_string()
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            privilege_command: default_privilege_command(),
            script_mode_flag: default_script_mode_flag(),
        }
    }
}

impl ExecutorConfig {
    /// 设置 gluster 可执行文件
    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// 设置提权命令
    pub fn privilege_command(mut self, command: impl Into<String>) -> Self {
        self.privilege_command = command.into();
        self
    }

    /// 不提权（进程本身已是 root）
    pub fn without_privilege(mut self) -> Self {
        self.privilege_command.clear();
        self
    }

    /// 提权命令（未配置时返回 None）
    pub fn privilege(&self) -> Option<&str> {
        let command = self.privilege_command.trim();
        if command.is_empty() {
            None
        } else {
            Some(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.binary, "gluster");
        assert_eq!(config.privilege(), Some("sudo"));
        assert_eq!(config.script_mode_flag, "--mode=script");
    }

    #[test]
    fn test_config_builder() {
        let config = ExecutorConfig::default()
            .binary("/usr/sbin/gluster")
            .without_privilege();
        assert_eq!(config.binary, "/usr/sbin/gluster");
        assert!(config.privilege().is_none());

        let config = config.privilege_command("doas");
        assert_eq!(config.privilege(), Some("doas"));
    }

    #[test]
    fn test_config_from_toml_defaults() {
        let config: ExecutorConfig = toml::from_str("binary = \"/opt/gluster/bin/gluster\"").unwrap();
        assert_eq!(config.binary, "/opt/gluster/bin/gluster");
        assert_eq!(config.privilege(), Some("sudo"));
        assert_eq!(config.script_mode_flag, "--mode=script");
    }

    #[test]
    fn test_empty_privilege_command() {
        let config: ExecutorConfig = toml::from_str("privilege_command = \"\"").unwrap();
        assert!(config.privilege().is_none());
    }
}
