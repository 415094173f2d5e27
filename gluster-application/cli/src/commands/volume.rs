//! 卷管理命令

use anyhow::{Context, Result};
use colored::Colorize;
use gluster_cluster::{
    brick_and_server_cartesian_product, local_bricks, Brick, GlusterOption, OptionKey, Peer,
    Transport, VolumeClient,
};

use super::output::{output_formatted, print_json, print_table};
use crate::config::CliConfig;
use crate::VolumeAction;

/// 根据命令行参数确定的卷拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topology {
    Distributed,
    Replicated { replica: u32 },
    Arbiter { replica: u32, arbiter: u32 },
    Striped { stripe: u32 },
    StripedReplicated { stripe: u32, replica: u32 },
    Erasure { disperse: u32, redundancy: u32 },
}

impl Topology {
    fn plan(
        replica: Option<u32>,
        arbiter: Option<u32>,
        stripe: Option<u32>,
        disperse: Option<u32>,
        redundancy: Option<u32>,
    ) -> Result<Self> {
        let topology = match (replica, arbiter, stripe, disperse, redundancy) {
            (None, None, None, None, None) => Topology::Distributed,
            (Some(replica), None, None, None, None) => Topology::Replicated { replica },
            (Some(replica), Some(arbiter), None, None, None) => {
                Topology::Arbiter { replica, arbiter }
            }
            (None, None, Some(stripe), None, None) => Topology::Striped { stripe },
            (Some(replica), None, Some(stripe), None, None) => {
                Topology::StripedReplicated { stripe, replica }
            }
            (None, None, None, Some(disperse), Some(redundancy)) => {
                Topology::Erasure {
                    disperse,
                    redundancy,
                }
            }
            _ => anyhow::bail!("不支持的拓扑参数组合"),
        };
        Ok(topology)
    }

    async fn create(
        self,
        volumes: &VolumeClient,
        name: &str,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> gluster_cluster::Result<()> {
        match self {
            Topology::Distributed => {
                volumes
                    .create_distributed(name, transport, bricks, force)
                    .await
            }
            Topology::Replicated { replica } => {
                volumes
                    .create_replicated(name, replica, transport, bricks, force)
                    .await
            }
            Topology::Arbiter { replica, arbiter } => {
                volumes
                    .create_arbiter(name, replica, arbiter, transport, bricks, force)
                    .await
            }
            Topology::Striped { stripe } => {
                volumes
                    .create_striped(name, stripe, transport, bricks, force)
                    .await
            }
            Topology::StripedReplicated { stripe, replica } => {
                volumes
                    .create_striped_replicated(name, stripe, replica, transport, bricks, force)
                    .await
            }
            Topology::Erasure {
                disperse,
                redundancy,
            } => {
                volumes
                    .create_erasure(name, disperse, redundancy, transport, bricks, force)
                    .await
            }
        }
    }
}

/// 解析 `host:/path` 格式的 Brick
fn parse_brick(spec: &str) -> Result<Brick> {
    let spec = spec.trim();
    let (host, path) = spec
        .find(":/")
        .map(|idx| (&spec[..idx], &spec[idx + 1..]))
        .filter(|(host, _)| !host.is_empty())
        .with_context(|| format!("Brick 格式应为 host:/path: {}", spec))?;
    Ok(Brick::new(Peer::unassigned(host), path))
}

fn parse_bricks(specs: &[String]) -> Result<Vec<Brick>> {
    specs.iter().map(|s| parse_brick(s)).collect()
}

/// 确定创建卷使用的 Brick 列表
fn layout_bricks(bricks: &[String], peers: &[String], paths: &[String]) -> Result<Vec<Brick>> {
    if !bricks.is_empty() {
        return parse_bricks(bricks);
    }
    if peers.is_empty() || paths.is_empty() {
        anyhow::bail!("需要指定 --bricks，或同时指定 --peers 与 --paths");
    }
    let peers: Vec<Peer> = peers.iter().map(|h| Peer::unassigned(h.trim())).collect();
    Ok(brick_and_server_cartesian_product(&peers, paths))
}

fn parse_option(key: &str, value: &str) -> Result<GlusterOption> {
    let key = OptionKey::from_wire(key).with_context(|| format!("不支持的卷选项: {}", key))?;
    Ok(GlusterOption::new(key, value))
}

pub async fn handle(action: VolumeAction, config: &CliConfig) -> Result<()> {
    let client = config.client();
    let volumes = client.volumes();

    match action {
        VolumeAction::List => {
            for name in volumes.list().await.context("获取卷列表失败")? {
                println!("{}", name);
            }
        }
        VolumeAction::Info { name, format } => {
            let list = match name {
                Some(name) => vec![volumes.volume_info(&name).await?],
                None => volumes.info().await.context("获取卷信息失败")?,
            };
            output_formatted(&list, format)?;
        }
        VolumeAction::Status { name, format } => {
            let status = volumes.status(&name).await?;
            match format {
                crate::OutputFormat::Json => print_json(&status)?,
                crate::OutputFormat::Table => {
                    print_table(&status.bricks);
                    if !status.daemons.is_empty() {
                        println!();
                        print_table(&status.daemons);
                    }
                }
            }
        }
        VolumeAction::Create {
            name,
            bricks,
            peers,
            paths,
            replica,
            arbiter,
            stripe,
            disperse,
            redundancy,
            transport,
            force,
        } => {
            let transport = Transport::from_label(&transport)
                .with_context(|| format!("不支持的传输类型: {}", transport))?;
            let topology = Topology::plan(replica, arbiter, stripe, disperse, redundancy)?;
            let bricks = layout_bricks(&bricks, &peers, &paths)?;

            topology
                .create(&volumes, &name, transport, &bricks, force)
                .await
                .with_context(|| format!("创建卷 {} 失败", name))?;
            println!(
                "{} 卷 {} 创建成功 ({} 个 Brick)",
                "✓".green().bold(),
                name.cyan().bold(),
                bricks.len()
            );
            for brick in &bricks {
                println!("  {}", brick.to_string().yellow());
            }
        }
        VolumeAction::Delete { name } => {
            volumes.delete(&name).await?;
            println!("{} 卷 {} 已删除", "✓".green().bold(), name.cyan().bold());
        }
        VolumeAction::Start { name, force } => {
            volumes.start(&name, force).await?;
            println!("{} 卷 {} 已启动", "✓".green().bold(), name.cyan().bold());
        }
        VolumeAction::Stop { name, force } => {
            volumes.stop(&name, force).await?;
            println!("{} 卷 {} 已停止", "✓".green().bold(), name.cyan().bold());
        }
        VolumeAction::Rebalance { name } => {
            volumes.rebalance(&name).await?;
            println!("{} 卷 {} 再平衡已启动", "✓".green().bold(), name.cyan().bold());
        }
        VolumeAction::Set { name, key, value } => {
            let option = parse_option(&key, &value)?;
            volumes.set_option(&name, &option).await?;
            println!(
                "{} 卷 {} {} = {}",
                "✓".green().bold(),
                name.cyan().bold(),
                option.key,
                option.value.yellow()
            );
        }
        VolumeAction::AddBrick {
            name,
            bricks,
            force,
        } => {
            let bricks = parse_bricks(&bricks)?;
            volumes.add_brick(&name, &bricks, force).await?;
            println!(
                "{} 卷 {} 已添加 {} 个 Brick",
                "✓".green().bold(),
                name.cyan().bold(),
                bricks.len()
            );
        }
        VolumeAction::RemoveBrick {
            name,
            bricks,
            force,
        } => {
            let bricks = parse_bricks(&bricks)?;
            volumes.remove_brick(&name, &bricks, force).await?;
            println!(
                "{} 卷 {} 移除 {} 个 Brick{}",
                "✓".green().bold(),
                name.cyan().bold(),
                bricks.len(),
                if force { "" } else { " (数据迁移已开始)" }
            );
        }
        VolumeAction::LocalBricks { name } => {
            let volume = volumes.volume_info(&name).await?;
            let local = client.resolver().local_ip().await?.to_string();
            for brick in local_bricks(&volume, &local) {
                println!("{}", brick.path.display());
            }
        }
    }

    Ok(())
}
