//! 地址解析与容量换算命令

use anyhow::{Context, Result};

use crate::config::CliConfig;

/// 解析主机名
pub async fn resolve(name: &str, config: &CliConfig) -> Result<()> {
    let ip = config
        .resolver()
        .resolve_to_ip(name)
        .await
        .with_context(|| format!("无法解析 {}", name))?;
    println!("{}", ip);
    Ok(())
}

/// 容量换算
pub fn to_bytes(size: &str) -> Result<()> {
    let bytes = gluster_cluster::to_bytes(size)?;
    println!("{}", bytes);
    Ok(())
}
