//! 对等节点管理命令

use anyhow::{Context, Result};
use colored::Colorize;
use gluster_cluster::peers_are_ready;

use super::output::{output_formatted, print_json};
use crate::config::CliConfig;
use crate::PeerAction;

pub async fn handle(action: PeerAction, config: &CliConfig) -> Result<()> {
    let peers = config.client().peers();

    match action {
        PeerAction::List { format } => {
            let list = peers.list().await.context("获取节点列表失败")?;
            output_formatted(&list, format)
        }
        PeerAction::Status { format } => {
            let list = peers.status().await.context("获取节点状态失败")?;
            output_formatted(&list, format)
        }
        PeerAction::Get { host } => match peers.get(&host).await? {
            Some(peer) => print_json(&peer),
            None => anyhow::bail!("节点 {} 不在集群中", host),
        },
        PeerAction::Probe { host } => {
            peers
                .probe(&host)
                .await
                .with_context(|| format!("探测节点 {} 失败", host))?;
            println!("{} 已探测节点 {}", "✓".green().bold(), host.cyan().bold());
            Ok(())
        }
        PeerAction::Detach { host, force } => {
            peers
                .remove(&host, force)
                .await
                .with_context(|| format!("移除节点 {} 失败", host))?;
            println!("{} 已移除节点 {}", "✓".green().bold(), host.cyan().bold());
            Ok(())
        }
        PeerAction::ProbeAll { hosts, skip } => {
            let report = peers.probe_all(&hosts, &skip).await;
            for host in &report.probed {
                println!("{} {}", "✓".green().bold(), host);
            }
            for host in &report.skipped {
                println!("{} {} (已探测)", "-".dimmed(), host);
            }
            for (host, reason) in &report.failed {
                println!("{} {}: {}", "✗".red().bold(), host, reason);
            }
            if !report.is_complete() {
                anyhow::bail!("{} 个节点探测失败", report.failed.len());
            }
            Ok(())
        }
        PeerAction::Ready => {
            let list = peers.status().await.context("获取节点状态失败")?;
            if peers_are_ready(&list) {
                println!("{} 全部 {} 个节点已加入集群", "✓".green().bold(), list.len());
                Ok(())
            } else {
                for peer in list.iter().filter(|p| !p.is_in_cluster()) {
                    println!("{} {} ({})", "✗".red().bold(), peer.host, peer.state.to_string().yellow());
                }
                anyhow::bail!("存在未就绪的节点")
            }
        }
    }
}
