//! 对等节点模型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 对等节点状态
///
/// 状态转换发生在 gluster 内部，这里只记录查询时看到的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Connected,
    PeerInCluster,
    AcceptedPeerRequest,
    SentPeerRequest,
    PeerRejected,
    PeerDisconnected,
    Unknown,
}

impl State {
    /// 状态的展示名称
    pub fn as_str(self) -> &'static str {
        match self {
            State::Connected => "Connected",
            State::PeerInCluster => "Peer in Cluster",
            State::AcceptedPeerRequest => "Accepted peer request",
            State::SentPeerRequest => "Sent peer request",
            State::PeerRejected => "Peer Rejected",
            State::PeerDisconnected => "Disconnected",
            State::Unknown => "Unknown",
        }
    }

    /// 根据 gluster 的 `stateStr` 与 `connected` 字段确定状态
    ///
    /// `connected` 为 false 时一律视为断开；`stateStr` 缺失时为 Unknown。
    pub fn from_report(state_str: Option<&str>, connected: Option<bool>) -> State {
        if connected == Some(false) {
            return State::PeerDisconnected;
        }
        state_str.map(State::from_label).unwrap_or(State::Unknown)
    }

    fn from_label(label: &str) -> State {
        match label.trim().to_ascii_lowercase().as_str() {
            "peer in cluster" => State::PeerInCluster,
            "accepted peer request"
            | "peer is connected and accepted"
            | "probe received from peer" => State::AcceptedPeerRequest,
            "sent peer request" | "sent and received peer request" | "probe sent to peer" => {
                State::SentPeerRequest
            }
            "peer rejected" => State::PeerRejected,
            "connected" | "connected to peer" => State::Connected,
            "disconnected" | "peer disconnected" => State::PeerDisconnected,
            _ => State::Unknown,
        }
    }
}

impl FromStr for State {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(State::from_label(s))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 集群对等节点
///
/// 相等性比较全部字段；按主机查找请使用 [`Peer::same_host`]。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    /// gluster 分配的 UUID（新探测的节点可能尚未分配）
    pub id: Option<Uuid>,
    /// 已解析的 IP 或主机名
    pub host: String,
    /// 状态
    pub state: State,
}

impl Peer {
    /// 创建节点信息
    pub fn new(id: Option<Uuid>, host: impl Into<String>, state: State) -> Self {
        Self {
            id,
            host: host.into(),
            state,
        }
    }

    /// 尚未加入集群的节点（用于探测前或构造 Brick）
    pub fn unassigned(host: impl Into<String>) -> Self {
        Self::new(None, host, State::Unknown)
    }

    /// 按主机判断是否为同一节点，忽略 id 与状态
    pub fn same_host(&self, other: &Peer) -> bool {
        self.host == other.host
    }

    /// 是否已是集群成员
    pub fn is_in_cluster(&self) -> bool {
        self.state == State::PeerInCluster
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} ({}, {})", self.host, id, self.state),
            None => write!(f, "{} ({})", self.host, self.state),
        }
    }
}
