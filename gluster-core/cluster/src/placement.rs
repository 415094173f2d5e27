//! Brick 布局与节点筛选
//!
//! gluster 会把连续的 Brick 组成副本/条带组，所以 Brick 的顺序决定了数据分布。

use std::path::{Path, PathBuf};

use crate::models::{Brick, Peer, Volume};

/// 节点 × 路径的笛卡尔积
///
/// 外层遍历路径，内层遍历节点，保证同一路径上的 Brick 相邻、分属不同节点。
pub fn brick_and_server_cartesian_product<P: AsRef<Path>>(peers: &[Peer], paths: &[P]) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(peers.len() * paths.len());
    for path in paths {
        for peer in peers {
            bricks.push(Brick::new(peer.clone(), PathBuf::from(path.as_ref())));
        }
    }
    bricks
}

/// 尚未在卷中提供 Brick 的节点
///
/// 按主机比较，已提供 Brick 的节点即使状态不同也会被排除。
pub fn find_new_peers(peers: &[Peer], volume: &Volume) -> Vec<Peer> {
    peers
        .iter()
        .filter(|peer| !volume.bricks.iter().any(|b| b.owner.same_host(peer)))
        .cloned()
        .collect()
}

/// 所有节点都已加入集群
pub fn peers_are_ready(peers: &[Peer]) -> bool {
    peers.iter().all(Peer::is_in_cluster)
}

/// 卷中位于本机的 Brick
pub fn local_bricks<'a>(volume: &'a Volume, local_host: &str) -> Vec<&'a Brick> {
    volume.bricks_on(local_host)
}
