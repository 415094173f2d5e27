//! 目录配额命令

use anyhow::{Context, Result};
use colored::Colorize;

use super::output::output_formatted;
use crate::config::CliConfig;
use crate::QuotaAction;

pub async fn handle(action: QuotaAction, config: &CliConfig) -> Result<()> {
    let volumes = config.client().volumes();

    match action {
        QuotaAction::Enable { name } => {
            volumes.enable_quotas(&name).await?;
            println!("{} 卷 {} 已开启配额", "✓".green().bold(), name.cyan().bold());
        }
        QuotaAction::Disable { name } => {
            volumes.disable_quotas(&name).await?;
            println!("{} 卷 {} 已关闭配额", "✓".green().bold(), name.cyan().bold());
        }
        QuotaAction::Limit { name, path, size } => {
            let bytes = parse_limit(&size)?;
            volumes
                .add_quota(&name, &path, bytes)
                .await
                .with_context(|| format!("设置 {}:{} 配额失败", name, path))?;
            println!(
                "{} 卷 {} 目录 {} 配额 {} 字节",
                "✓".green().bold(),
                name.cyan().bold(),
                path.yellow(),
                bytes
            );
        }
        QuotaAction::Remove { name, path } => {
            volumes.remove_quota(&name, &path).await?;
            println!(
                "{} 卷 {} 目录 {} 配额已删除",
                "✓".green().bold(),
                name.cyan().bold(),
                path.yellow()
            );
        }
        QuotaAction::List { name, format } => {
            let quotas = volumes
                .quota_list(&name)
                .await
                .with_context(|| format!("获取卷 {} 配额失败", name))?;
            output_formatted(&quotas, format)?;
        }
    }

    Ok(())
}

/// 容量字符串换算为整数字节
fn parse_limit(size: &str) -> Result<u64> {
    let bytes = gluster_cluster::to_bytes(size)?;
    if bytes < 1.0 {
        anyhow::bail!("配额必须大于 0: {}", size);
    }
    Ok(bytes.round() as u64)
}
