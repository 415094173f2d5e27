//! Gluster 集群控制库
//!
//! 将集群操作转换为 `gluster` 命令行调用，并把 `--xml` 输出解析为强类型模型：
//! - 对等节点：探测、移除、`peer status` / `pool list`
//! - 卷：多种拓扑的创建、启停、再平衡、扩缩容、选项
//! - 配额与位腐败检测
//!
//! 所有操作都返回 [`Result`]，不会 panic，也不会在失败时猜测默认值。
//!
//! # 示例
//!
//! ```ignore
//! use std::sync::Arc;
//! use gluster_cluster::{GlusterClient, Resolver, StaticAddress, Transport};
//! use gluster_executor::ExecutorConfig;
//!
//! let resolver = Resolver::system(Arc::new(StaticAddress::new("172.20.21.231")));
//! let client = GlusterClient::local(ExecutorConfig::default(), resolver);
//!
//! let peers = client.peers().list().await?;
//! let bricks = gluster_cluster::brick_and_server_cartesian_product(&peers, &["/mnt/sdb"]);
//! client
//!     .volumes()
//!     .create_replicated("test", 3, Transport::Tcp, &bricks, false)
//!     .await?;
//! ```

mod client;
mod command;
mod error;
mod models;
mod parser;
mod peer;
mod placement;
mod resolver;
mod units;
mod volume;

#[cfg(test)]
mod testing;

pub use client::GlusterClient;
pub use command::DEFAULT_BINARY;
pub use error::{GlusterError, Result};
pub use models::{
    BitrotOption, Brick, BrickStatus, DaemonStatus, GlusterOption, LimitExceeded, OptionKey, Peer,
    Quota, ScrubControl, ScrubFrequency, ScrubThrottle, State, Transport, Volume, VolumeStatus,
    VolumeTranslator, VolumeType,
};
pub use parser::{
    parse_peer_status, parse_pool_list, parse_quota_list, parse_volume_info, parse_volume_list,
    parse_volume_status,
};
pub use peer::{PeerClient, ProbeReport};
pub use placement::{
    brick_and_server_cartesian_product, find_new_peers, local_bricks, peers_are_ready,
};
pub use resolver::{HostLookup, Resolver, RouteAddress, StaticAddress, SystemLookup, UnitAddress};
pub use units::{to_bytes, Unit};
pub use volume::VolumeClient;
