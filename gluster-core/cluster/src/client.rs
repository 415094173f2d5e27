//! Gluster 客户端入口

use std::sync::Arc;

use gluster_executor::{CommandRunner, ExecutorConfig, LocalRunner};

use crate::command::{GlusterCli, DEFAULT_BINARY};
use crate::peer::PeerClient;
use crate::resolver::Resolver;
use crate::volume::VolumeClient;

/// Gluster 客户端
///
/// 每个操作都是一次独立的 gluster 调用，客户端本身不保存集群状态，可自由克隆。
#[derive(Clone)]
pub struct GlusterClient {
    runner: Arc<dyn CommandRunner>,
    binary: String,
    resolver: Resolver,
}

impl GlusterClient {
    /// 创建客户端
    pub fn new(runner: Arc<dyn CommandRunner>, resolver: Resolver) -> Self {
        Self {
            runner,
            binary: DEFAULT_BINARY.to_string(),
            resolver,
        }
    }

    /// 使用本地进程执行
    pub fn local(config: ExecutorConfig, resolver: Resolver) -> Self {
        let binary = config.binary.clone();
        Self::new(Arc::new(LocalRunner::new(config)), resolver).with_binary(binary)
    }

    /// 指定 gluster 可执行文件
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// 对等节点操作
    pub fn peers(&self) -> PeerClient {
        PeerClient::new(self.cli(), self.resolver.clone())
    }

    /// 卷操作
    pub fn volumes(&self) -> VolumeClient {
        VolumeClient::new(self.cli())
    }

    /// 地址解析器
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    fn cli(&self) -> GlusterCli {
        GlusterCli::new(self.runner.clone(), self.binary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticAddress;
    use crate::testing::MockRunner;

    fn resolver() -> Resolver {
        Resolver::system(Arc::new(StaticAddress::new("10.0.0.1")))
    }

    #[tokio::test]
    async fn test_custom_binary_is_used() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .withf(|command, args, as_root, script_mode| {
                command == "/usr/sbin/gluster"
                    && args == ["volume", "delete", "test"]
                    && *as_root
                    && *script_mode
            })
            .times(1)
            .returning(|_, _, _, _| Ok(String::new()));

        let client = GlusterClient::new(Arc::new(runner), resolver()).with_binary("/usr/sbin/gluster");
        client.volumes().delete("test").await.unwrap();
    }

    #[tokio::test]
    async fn test_resolver_is_shared() {
        let client = GlusterClient::new(Arc::new(MockRunner::new()), resolver());
        assert_eq!(
            client.resolver().local_ip().await.unwrap().to_string(),
            "10.0.0.1"
        );
    }

    #[test]
    fn test_local_client_uses_config_binary() {
        let config = ExecutorConfig::default().binary("/opt/gluster/bin/gluster");
        let client = GlusterClient::local(config, resolver());
        assert_eq!(client.binary, "/opt/gluster/bin/gluster");
    }
}
