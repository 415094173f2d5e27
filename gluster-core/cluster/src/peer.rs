//! 对等节点操作
//!
//! 只负责观察与发起成员变更；状态转换由 gluster 自身完成。

use serde::Serialize;
use tracing::{info, warn};

use crate::command::{args, GlusterCli};
use crate::error::{GlusterError, Result};
use crate::models::Peer;
use crate::parser::{parse_peer_status, parse_pool_list};
use crate::resolver::{Resolver, LOCALHOST};

/// 批量探测结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// 本次成功探测的主机
    pub probed: Vec<String>,
    /// 已探测过而跳过的主机
    pub skipped: Vec<String>,
    /// 探测失败的主机及原因
    pub failed: Vec<(String, String)>,
}

impl ProbeReport {
    /// 是否全部成功
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 对等节点客户端
#[derive(Clone)]
pub struct PeerClient {
    cli: GlusterCli,
    resolver: Resolver,
}

impl PeerClient {
    pub(crate) fn new(cli: GlusterCli, resolver: Resolver) -> Self {
        Self { cli, resolver }
    }

    /// 集群全部节点（`pool list`），包括本节点
    ///
    /// 本节点在输出中为 `localhost`，这里替换为本机地址。
    pub async fn list(&self) -> Result<Vec<Peer>> {
        let output = self.cli.query(args!["pool", "list", "--xml"]).await?;
        let mut peers = parse_pool_list(&output)?;

        if peers.iter().any(|p| p.host.eq_ignore_ascii_case(LOCALHOST)) {
            let local = self.resolver.local_ip().await?.to_string();
            for peer in peers
                .iter_mut()
                .filter(|p| p.host.eq_ignore_ascii_case(LOCALHOST))
            {
                peer.host = local.clone();
            }
        }
        Ok(peers)
    }

    /// 除本节点外的节点（`peer status`）
    pub async fn status(&self) -> Result<Vec<Peer>> {
        let output = self.cli.query(args!["peer", "status", "--xml"]).await?;
        parse_peer_status(&output)
    }

    /// 按主机查找节点，只比较主机
    ///
    /// 先按原字符串匹配，找不到时再解析为 IP 匹配。
    pub async fn get(&self, host: &str) -> Result<Option<Peer>> {
        let peers = self.list().await?;
        if let Some(peer) = peers.iter().find(|p| p.host == host) {
            return Ok(Some(peer.clone()));
        }

        let resolved = self.resolver.resolve_to_ip(host).await?.to_string();
        Ok(peers.into_iter().find(|p| p.host == resolved))
    }

    /// 探测节点（`peer probe <host>`）
    pub async fn probe(&self, host: &str) -> Result<()> {
        let host = checked_host(host)?;
        info!("探测节点: {}", host);
        self.cli.run(args!["peer", "probe", host], false).await?;
        Ok(())
    }

    /// 移除节点（`peer detach <host> [force]`）
    pub async fn remove(&self, host: &str, force: bool) -> Result<()> {
        let host = checked_host(host)?;
        info!("移除节点: {} (force={})", host, force);
        let mut args = args!["peer", "detach", host];
        if force {
            args.push("force".to_string());
        }
        self.cli.run(args, false).await?;
        Ok(())
    }

    /// 依次探测尚未探测过的主机
    ///
    /// 单个主机失败不会中断后续探测，失败原因记录在报告中。
    ///
    /// # Arguments
    /// * `hosts` - 待探测的主机
    /// * `already_probed` - 之前已探测过的主机，直接跳过
    ///
    /// # Returns
    /// 成功、跳过与失败的主机列表；此方法本身不会失败
    pub async fn probe_all(&self, hosts: &[String], already_probed: &[String]) -> ProbeReport {
        let mut report = ProbeReport::default();

        for host in hosts {
            if already_probed.contains(host) || report.probed.contains(host) {
                report.skipped.push(host.clone());
                continue;
            }
            match self.probe(host).await {
                Ok(()) => report.probed.push(host.clone()),
                Err(e) => {
                    warn!("探测节点 {} 失败: {}", host, e);
                    report.failed.push((host.clone(), e.to_string()));
                }
            }
        }

        info!(
            "批量探测完成: 成功 {}, 跳过 {}, 失败 {}",
            report.probed.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }
}

fn checked_host(host: &str) -> Result<&str> {
    let host = host.trim();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(GlusterError::InvalidArgument(format!(
            "主机名不合法: '{}'",
            host
        )));
    }
    Ok(host)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::command::DEFAULT_BINARY;
    use crate::models::State;
    use crate::resolver::StaticAddress;
    use crate::testing::{expect_gluster, MockRunner, OK_HEADER};
    use gluster_executor::ExecError;

    fn client(runner: MockRunner) -> PeerClient {
        let runner = Arc::new(runner);
        let resolver = Resolver::system(Arc::new(StaticAddress::new("172.31.21.243")));
        PeerClient::new(GlusterCli::new(runner, DEFAULT_BINARY), resolver)
    }

    fn pool_xml() -> String {
        format!(
            "{}<peerStatus>\
             <peer><uuid>663bbc5b-c9b4-4a02-8b56-85e05e1b01c8</uuid><hostname>172.31.12.7</hostname>\
             <connected>1</connected><state>3</state><stateStr>Peer in Cluster</stateStr></peer>\
             <peer><uuid>cebf02bb-a304-4058-986e-375e2e1e5313</uuid><hostname>localhost</hostname>\
             <connected>1</connected></peer>\
             </peerStatus></cliOutput>",
            OK_HEADER
        )
    }

    #[tokio::test]
    async fn test_list_replaces_localhost() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["pool", "list", "--xml"], false, pool_xml());

        let peers = client(runner).list().await.unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].host, "172.31.12.7");
        assert_eq!(peers[0].state, State::PeerInCluster);
        assert_eq!(peers[1].host, "172.31.21.243");
        assert_eq!(peers[1].state, State::Unknown);
    }

    #[tokio::test]
    async fn test_get_matches_host_only() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["pool", "list", "--xml"], false, pool_xml());

        let peer = client(runner).get("172.31.12.7").await.unwrap().unwrap();
        assert_eq!(peer.host, "172.31.12.7");
        assert_eq!(
            peer.id.map(|id| id.to_string()).as_deref(),
            Some("663bbc5b-c9b4-4a02-8b56-85e05e1b01c8")
        );
    }

    #[tokio::test]
    async fn test_get_localhost_resolves_to_unit_address() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["pool", "list", "--xml"], false, pool_xml());

        let peer = client(runner).get("localhost").await.unwrap().unwrap();
        assert_eq!(peer.host, "172.31.21.243");
    }

    #[tokio::test]
    async fn test_get_unknown_host() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["pool", "list", "--xml"], false, pool_xml());

        assert_eq!(client(runner).get("10.9.9.9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_args() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["peer", "probe", "172.31.12.7"], false, String::new());

        client(runner).probe("172.31.12.7").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_args() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["peer", "detach", "172.31.12.7"], false, String::new());
        expect_gluster(
            &mut runner,
            &["peer", "detach", "172.31.21.242", "force"],
            false,
            String::new(),
        );

        let client = client(runner);
        client.remove("172.31.12.7", false).await.unwrap();
        client.remove("172.31.21.242", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_probe_rejects_bad_host_without_running() {
        let mut runner = MockRunner::new();
        runner.expect_run().never();

        let client = client(runner);
        assert!(matches!(
            client.probe("").await,
            Err(GlusterError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.probe("a b").await,
            Err(GlusterError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_probe_all_collects_failures() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["peer", "probe", "10.0.0.2"], false, String::new());
        runner
            .expect_run()
            .withf(|_, args, _, _| args == ["peer", "probe", "10.0.0.3"])
            .times(1)
            .returning(|_, _, _, _| {
                Err(ExecError::NonZeroExit {
                    code: Some(1),
                    message: "peer probe: failed: Probe returned with Transport endpoint is not connected".to_string(),
                })
            });
        expect_gluster(&mut runner, &["peer", "probe", "10.0.0.4"], false, String::new());

        let hosts: Vec<String> = ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let report = client(runner)
            .probe_all(&hosts, &["10.0.0.1".to_string()])
            .await;

        assert_eq!(report.skipped, vec!["10.0.0.1"]);
        assert_eq!(report.probed, vec!["10.0.0.2", "10.0.0.4"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "10.0.0.3");
        assert!(report.failed[0].1.contains("Transport endpoint"));
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_status_tool_failure() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["peer", "status", "--xml"],
            false,
            "<cliOutput><opRet>-1</opRet><opErrno>0</opErrno><opErrstr>glusterd down</opErrstr></cliOutput>"
                .to_string(),
        );

        assert!(matches!(
            client(runner).status().await,
            Err(GlusterError::ToolReported { .. })
        ));
    }
}
