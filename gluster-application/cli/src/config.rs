//! CLI 配置管理
//!
//! **数据存储方式**: TOML 文件 (~/.config/glusterctl/config.toml)，文件不存在时使用默认值
//!
//! ```toml
//! unit_address = "172.20.21.231"
//!
//! [executor]
//! binary = "gluster"
//! privilege_command = "sudo"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use gluster_cluster::{GlusterClient, Resolver, RouteAddress, StaticAddress, UnitAddress};
use gluster_executor::{ExecutorConfig, LocalRunner};
use serde::{Deserialize, Serialize};

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// 命令执行设置
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// 本机地址（IP 或主机名），未设置时通过路由表推断
    pub unit_address: Option<String>,

    /// 推断本机地址时使用的探测目标，未设置时使用默认网关
    pub route_probe_target: Option<String>,
}

impl CliConfig {
    /// 获取默认配置文件路径
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("glusterctl").join("config.toml"))
    }

    /// 加载配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 构造本机地址提供者
    pub fn unit_address(&self) -> Arc<dyn UnitAddress> {
        match self.unit_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Arc::new(StaticAddress::new(address)),
            _ => {
                let runner = Arc::new(LocalRunner::new(self.executor.clone()));
                let provider = RouteAddress::new(runner);
                match &self.route_probe_target {
                    Some(target) => Arc::new(provider.with_target(target.clone())),
                    None => Arc::new(provider),
                }
            }
        }
    }

    /// 构造地址解析器
    pub fn resolver(&self) -> Resolver {
        Resolver::system(self.unit_address())
    }

    /// 构造 Gluster 客户端
    pub fn client(&self) -> GlusterClient {
        GlusterClient::local(self.executor.clone(), self.resolver())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.executor, ExecutorConfig::default());
        assert_eq!(config.unit_address, None);
        assert_eq!(config.route_probe_target, None);
    }

    #[test]
    fn test_parse_config() {
        let config = CliConfig::from_toml(
            r#"
            unit_address = "172.20.21.231"

            [executor]
            binary = "/usr/sbin/gluster"
            privilege_command = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.unit_address.as_deref(), Some("172.20.21.231"));
        assert_eq!(config.executor.binary, "/usr/sbin/gluster");
        assert_eq!(config.executor.privilege(), None);
        assert_eq!(config.executor.script_mode_flag, "--mode=script");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = CliConfig::load(Some(Path::new("/nonexistent/glusterctl.toml"))).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        assert!(CliConfig::from_toml("executor = 3").is_err());
    }

    #[tokio::test]
    async fn test_static_unit_address() {
        let config = CliConfig {
            unit_address: Some("10.1.2.3".to_string()),
            ..Default::default()
        };
        let ip = config.resolver().local_ip().await.unwrap();
        assert_eq!(ip.to_string(), "10.1.2.3");
    }
}
