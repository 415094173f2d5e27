//! CLI 通用输出格式化模块
//!
//! 提供 table/json 两种输出格式

use anyhow::Result;
use gluster_cluster::{BrickStatus, DaemonStatus, LimitExceeded, Peer, Quota, Volume};
use serde::Serialize;

use crate::OutputFormat;

/// 可输出为表格行的数据 trait
pub trait TableRow {
    /// 返回表格列标题
    fn headers() -> Vec<&'static str>;

    /// 返回该项的表格行数据
    fn row(&self) -> Vec<String>;
}

/// 表格格式输出
pub fn print_table<T: TableRow>(items: &[T]) {
    let headers = T::headers();

    // 打印表头
    let header_line: String = headers
        .iter()
        .map(|h| format!("{:<24}", h))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", header_line);
    println!("{}", "-".repeat(header_line.len()));

    // 打印数据行
    for item in items {
        let row_line: String = item
            .row()
            .iter()
            .map(|c| format!("{:<24}", c))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", row_line);
    }
}

/// JSON 格式输出
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 根据格式参数选择输出方式
pub fn output_formatted<T: TableRow + Serialize>(items: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(items)?,
        OutputFormat::Table => print_table(items),
    }
    Ok(())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl TableRow for Peer {
    fn headers() -> Vec<&'static str> {
        vec!["主机", "UUID", "状态"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.host.clone(), or_dash(self.id), self.state.to_string()]
    }
}

impl TableRow for Volume {
    fn headers() -> Vec<&'static str> {
        vec!["卷名", "类型", "状态", "Brick 数", "传输"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.volume_type.to_string(),
            self.status.clone(),
            self.bricks.len().to_string(),
            self.transport.to_string(),
        ]
    }
}

impl TableRow for BrickStatus {
    fn headers() -> Vec<&'static str> {
        vec!["Brick", "在线", "TCP 端口", "PID"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            format!("{}:{}", self.host, self.path.display()),
            if self.online { "Y" } else { "N" }.to_string(),
            or_dash(self.tcp_port),
            or_dash(self.pid),
        ]
    }
}

impl TableRow for DaemonStatus {
    fn headers() -> Vec<&'static str> {
        vec!["服务", "节点", "在线", "PID"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.host.clone(),
            if self.online { "Y" } else { "N" }.to_string(),
            or_dash(self.pid),
        ]
    }
}

fn exceeded(flag: LimitExceeded) -> String {
    match flag {
        LimitExceeded::Yes => "Yes",
        LimitExceeded::No => "No",
        LimitExceeded::Unknown => "N/A",
    }
    .to_string()
}

impl TableRow for Quota {
    fn headers() -> Vec<&'static str> {
        vec!["路径", "硬限制", "软限制", "已用", "可用", "超软限", "超硬限"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.hard_limit.to_string(),
            format!("{} ({})", self.soft_limit, self.soft_limit_percentage),
            or_dash(self.used),
            or_dash(self.available),
            exceeded(self.soft_limit_exceeded),
            exceeded(self.hard_limit_exceeded),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gluster_cluster::State;

    #[test]
    fn test_peer_row() {
        let peer = Peer::new(None, "172.31.12.7", State::PeerInCluster);
        assert_eq!(peer.row(), vec!["172.31.12.7", "-", "Peer in Cluster"]);
        assert_eq!(Peer::headers().len(), peer.row().len());
    }

    #[test]
    fn test_quota_row() {
        let quota = Quota {
            path: "/".to_string(),
            hard_limit: 10240,
            soft_limit: 8192,
            soft_limit_percentage: "80%".to_string(),
            used: None,
            available: Some(10240),
            soft_limit_exceeded: LimitExceeded::No,
            hard_limit_exceeded: LimitExceeded::Unknown,
        };
        assert_eq!(
            quota.row(),
            vec!["/", "10240", "8192 (80%)", "-", "10240", "No", "N/A"]
        );
        assert_eq!(Quota::headers().len(), quota.row().len());
    }
}
