//! gluster `--xml` 输出解析模块
//!
//! 每份输出都包裹在 `<cliOutput>` 中，解析分两步：
//! 1. 先检查 `opRet`/`opErrno`/`opErrstr`，`opRet` 非 0 时返回 [`GlusterError::ToolReported`]
//! 2. 再反序列化具体的负载（`<peerStatus>`、`<volInfo>` 等）
//!
//! # 输出格式示例
//!
//! ```text
//! <cliOutput>
//!   <opRet>0</opRet>
//!   <opErrno>0</opErrno>
//!   <opErrstr/>
//!   <peerStatus>
//!     <peer>
//!       <uuid>663bbc5b-c9b4-4a02-8b56-85e05e1b01c8</uuid>
//!       <hostname>172.31.12.7</hostname>
//!       <connected>1</connected>
//!       <state>3</state>
//!       <stateStr>Peer in Cluster</stateStr>
//!     </peer>
//!   </peerStatus>
//! </cliOutput>
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{GlusterError, Result};
use crate::models::{
    Brick, BrickStatus, DaemonStatus, LimitExceeded, Peer, Quota, State, Transport, Volume,
    VolumeStatus, VolumeType,
};
use crate::units::to_bytes;

// ---------------------------------------------------------------------------
// 原始 XML 结构
//
// 叶子字段一律按字符串读取，再在转换阶段校验，便于给出带原文片段的错误。
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "opRet")]
    op_ret: Option<String>,
    #[serde(rename = "opErrno")]
    op_errno: Option<String>,
    #[serde(rename = "opErrstr")]
    op_errstr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PeerStatusDoc {
    #[serde(rename = "peerStatus")]
    peer_status: Option<RawPeerList>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPeerList {
    #[serde(default)]
    peer: Vec<RawPeer>,
}

#[derive(Debug, Deserialize)]
struct RawPeer {
    uuid: Option<String>,
    hostname: Option<String>,
    connected: Option<String>,
    #[serde(rename = "stateStr")]
    state_str: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VolInfoDoc {
    #[serde(rename = "volInfo")]
    vol_info: Option<RawVolInfo>,
}

#[derive(Debug, Deserialize)]
struct RawVolInfo {
    volumes: Option<RawVolumes>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVolumes {
    #[serde(default)]
    volume: Vec<RawVolume>,
}

#[derive(Debug, Deserialize)]
struct RawVolume {
    name: Option<String>,
    id: Option<String>,
    #[serde(rename = "statusStr")]
    status_str: Option<String>,
    #[serde(rename = "snapshotCount")]
    snapshot_count: Option<String>,
    #[serde(rename = "distCount")]
    dist_count: Option<String>,
    #[serde(rename = "stripeCount")]
    stripe_count: Option<String>,
    #[serde(rename = "replicaCount")]
    replica_count: Option<String>,
    #[serde(rename = "arbiterCount")]
    arbiter_count: Option<String>,
    #[serde(rename = "disperseCount")]
    disperse_count: Option<String>,
    #[serde(rename = "redundancyCount")]
    redundancy_count: Option<String>,
    #[serde(rename = "typeStr")]
    type_str: Option<String>,
    transport: Option<String>,
    bricks: Option<RawBricks>,
    options: Option<RawOptions>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBricks {
    #[serde(default)]
    brick: Vec<RawBrick>,
}

#[derive(Debug, Deserialize)]
struct RawBrick {
    #[serde(rename = "@uuid")]
    uuid: Option<String>,
    name: Option<String>,
    #[serde(rename = "hostUuid")]
    host_uuid: Option<String>,
    #[serde(rename = "isArbiter")]
    is_arbiter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    #[serde(default)]
    option: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    name: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VolListDoc {
    #[serde(rename = "volList")]
    vol_list: Option<RawVolList>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVolList {
    #[serde(default)]
    volume: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VolStatusDoc {
    #[serde(rename = "volStatus")]
    vol_status: Option<RawVolStatus>,
}

#[derive(Debug, Deserialize)]
struct RawVolStatus {
    volumes: Option<RawStatusVolumes>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStatusVolumes {
    #[serde(default)]
    volume: Vec<RawStatusVolume>,
}

#[derive(Debug, Deserialize)]
struct RawStatusVolume {
    #[serde(rename = "volName")]
    vol_name: Option<String>,
    #[serde(default)]
    node: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    hostname: Option<String>,
    path: Option<String>,
    peerid: Option<String>,
    status: Option<String>,
    port: Option<String>,
    ports: Option<RawPorts>,
    pid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPorts {
    tcp: Option<String>,
    rdma: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VolQuotaDoc {
    #[serde(rename = "volQuota")]
    vol_quota: Option<RawVolQuota>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVolQuota {
    #[serde(default)]
    limit: Vec<RawLimit>,
}

#[derive(Debug, Deserialize)]
struct RawLimit {
    path: Option<String>,
    hard_limit: Option<String>,
    soft_limit_percent: Option<String>,
    soft_limit_value: Option<String>,
    used_space: Option<String>,
    avail_space: Option<String>,
    sl_exceeded: Option<String>,
    hl_exceeded: Option<String>,
}

// ---------------------------------------------------------------------------
// 公共解析函数
// ---------------------------------------------------------------------------

/// 解析 `peer status --xml` 输出
///
/// 本节点不会出现在结果中。
pub fn parse_peer_status(raw: &str) -> Result<Vec<Peer>> {
    let doc: PeerStatusDoc = decode(raw)?;
    let list = doc
        .peer_status
        .ok_or_else(|| GlusterError::parse("缺少 <peerStatus>", raw))?;
    let peers = list
        .peer
        .into_iter()
        .map(|p| convert_peer(p, raw))
        .collect::<Result<Vec<_>>>()?;
    debug!("解析到 {} 个对等节点", peers.len());
    Ok(peers)
}

/// 解析 `pool list --xml` 输出
///
/// 格式与 `peer status` 相同，但包含本节点（主机名为 `localhost`）。
/// 这里保留 `localhost` 原样，由调用方替换为本机地址。
pub fn parse_pool_list(raw: &str) -> Result<Vec<Peer>> {
    parse_peer_status(raw)
}

/// 解析 `volume info [name] --xml` 输出
pub fn parse_volume_info(raw: &str) -> Result<Vec<Volume>> {
    let doc: VolInfoDoc = decode(raw)?;
    let info = doc
        .vol_info
        .ok_or_else(|| GlusterError::parse("缺少 <volInfo>", raw))?;
    let volumes = info.volumes.unwrap_or_default();
    let volumes = volumes
        .volume
        .into_iter()
        .map(|v| convert_volume(v, raw))
        .collect::<Result<Vec<_>>>()?;
    debug!("解析到 {} 个卷", volumes.len());
    Ok(volumes)
}

/// 解析 `volume list --xml` 输出
pub fn parse_volume_list(raw: &str) -> Result<Vec<String>> {
    let doc: VolListDoc = decode(raw)?;
    let list = doc
        .vol_list
        .ok_or_else(|| GlusterError::parse("缺少 <volList>", raw))?;
    Ok(list
        .volume
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// 解析 `vol status <name> --xml` 输出
///
/// `<path>` 以 `/` 开头的节点是 Brick 进程，其余是后台服务
/// （此时 `<hostname>` 为服务名，`<path>` 为所在节点）。
pub fn parse_volume_status(raw: &str) -> Result<Vec<VolumeStatus>> {
    let doc: VolStatusDoc = decode(raw)?;
    let status = doc
        .vol_status
        .ok_or_else(|| GlusterError::parse("缺少 <volStatus>", raw))?;
    let volumes = status.volumes.unwrap_or_default();

    let mut result = Vec::with_capacity(volumes.volume.len());
    for volume in volumes.volume {
        let name = required(volume.vol_name, "volName", raw)?;
        let mut bricks = Vec::new();
        let mut daemons = Vec::new();

        for node in volume.node {
            let host = required(node.hostname, "hostname", raw)?;
            let path = required(node.path, "path", raw)?;
            let peer_id = optional_uuid(node.peerid.as_deref(), raw)?;
            let online = flag(node.status.as_deref());
            let pid = optional_number::<u32>(node.pid.as_deref(), "pid", raw)?;

            if path.starts_with('/') {
                let (tcp, rdma) = match node.ports {
                    Some(ports) => (ports.tcp, ports.rdma),
                    None => (node.port, None),
                };
                bricks.push(BrickStatus {
                    host,
                    path: PathBuf::from(path),
                    peer_id,
                    online,
                    tcp_port: optional_number::<u16>(tcp.as_deref(), "tcp", raw)?,
                    rdma_port: optional_number::<u16>(rdma.as_deref(), "rdma", raw)?,
                    pid,
                });
            } else {
                daemons.push(DaemonStatus {
                    name: host,
                    host: path,
                    peer_id,
                    online,
                    pid,
                });
            }
        }

        debug!(
            "卷 {} 状态: {} 个 Brick, {} 个服务",
            name,
            bricks.len(),
            daemons.len()
        );
        result.push(VolumeStatus {
            name,
            bricks,
            daemons,
        });
    }

    Ok(result)
}

/// 解析 `volume quota <name> list --xml` 输出
pub fn parse_quota_list(raw: &str) -> Result<Vec<Quota>> {
    let doc: VolQuotaDoc = decode(raw)?;
    let quota = doc
        .vol_quota
        .ok_or_else(|| GlusterError::parse("缺少 <volQuota>", raw))?;

    quota
        .limit
        .into_iter()
        .map(|limit| {
            Ok(Quota {
                path: required(limit.path, "path", raw)?,
                hard_limit: size(limit.hard_limit.as_deref(), "hard_limit", raw)?,
                soft_limit: size(limit.soft_limit_value.as_deref(), "soft_limit_value", raw)?,
                soft_limit_percentage: required(
                    limit.soft_limit_percent,
                    "soft_limit_percent",
                    raw,
                )?,
                used: optional_size(limit.used_space.as_deref(), raw)?,
                available: optional_size(limit.avail_space.as_deref(), raw)?,
                soft_limit_exceeded: LimitExceeded::from_label(limit.sl_exceeded.as_deref()),
                hard_limit_exceeded: LimitExceeded::from_label(limit.hl_exceeded.as_deref()),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 内部辅助
// ---------------------------------------------------------------------------

/// 检查外层 `<cliOutput>` 并反序列化负载
fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    check_envelope(raw)?;
    quick_xml::de::from_str(raw)
        .map_err(|e| GlusterError::parse(format!("XML 结构不符合预期: {}", e), raw))
}

fn check_envelope(raw: &str) -> Result<()> {
    let envelope: Envelope = quick_xml::de::from_str(raw)
        .map_err(|e| GlusterError::parse(format!("无法解析 <cliOutput>: {}", e), raw))?;

    let ret = required(envelope.op_ret, "opRet", raw)?;
    let ret: i32 = ret
        .parse()
        .map_err(|_| GlusterError::parse(format!("opRet 不是整数: {}", ret), raw))?;
    if ret == 0 {
        return Ok(());
    }

    let errno = envelope
        .op_errno
        .as_deref()
        .and_then(|e| e.trim().parse::<i32>().ok());
    let message = envelope
        .op_errstr
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "(无错误描述)".to_string());

    debug!("gluster 报告失败: opRet {}, opErrno {:?}", ret, errno);
    Err(GlusterError::ToolReported {
        ret,
        errno,
        message,
    })
}

fn convert_peer(peer: RawPeer, raw: &str) -> Result<Peer> {
    let host = required(peer.hostname, "hostname", raw)?;
    let id = optional_uuid(peer.uuid.as_deref(), raw)?;
    let connected = peer.connected.as_deref().map(|c| flag(Some(c)));
    let state = State::from_report(peer.state_str.as_deref(), connected);
    Ok(Peer::new(id, host, state))
}

fn convert_volume(volume: RawVolume, raw: &str) -> Result<Volume> {
    let name = required(volume.name, "name", raw)?;
    let id_text = required(volume.id, "id", raw)?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        GlusterError::parse_near(format!("卷 {} 的 id 不是合法 UUID", name), raw, &id_text)
    })?;
    let status = required(volume.status_str, "statusStr", raw)?;

    let type_str = required(volume.type_str, "typeStr", raw)?;
    let volume_type = VolumeType::from_label(&type_str).ok_or_else(|| {
        GlusterError::parse_near(format!("未知的卷类型: {}", type_str), raw, &type_str)
    })?;

    let transport_code: u32 = number(volume.transport.as_deref(), "transport", raw)?;
    let transport = Transport::from_code(transport_code).ok_or_else(|| {
        GlusterError::parse_near(
            format!("未知的传输类型编码: {}", transport_code),
            raw,
            &format!("<transport>{}", transport_code),
        )
    })?;

    let replica_count = number(volume.replica_count.as_deref(), "replicaCount", raw)?;
    let arbiter_count = number(volume.arbiter_count.as_deref(), "arbiterCount", raw)?;
    if arbiter_count > replica_count {
        return Err(GlusterError::parse_near(
            format!(
                "卷 {} 的 arbiterCount ({}) 大于 replicaCount ({})",
                name, arbiter_count, replica_count
            ),
            raw,
            &format!("<name>{}</name>", name),
        ));
    }

    let bricks = volume
        .bricks
        .unwrap_or_default()
        .brick
        .into_iter()
        .map(|b| convert_brick(b, raw))
        .collect::<Result<Vec<_>>>()?;

    let mut options = BTreeMap::new();
    for option in volume.options.unwrap_or_default().option {
        let key = required(option.name, "option name", raw)?;
        let value = option.value.ok_or_else(|| {
            GlusterError::parse_near(
                format!("卷 {} 的选项 {} 缺少 <value>", name, key),
                raw,
                &format!("<name>{}</name>", key),
            )
        })?;
        options.insert(key, value.trim().to_string());
    }

    Ok(Volume {
        status,
        volume_type,
        transport,
        bricks,
        replica_count,
        arbiter_count,
        disperse_count: number(volume.disperse_count.as_deref(), "disperseCount", raw)?,
        redundancy_count: number(volume.redundancy_count.as_deref(), "redundancyCount", raw)?,
        stripe_count: number(volume.stripe_count.as_deref(), "stripeCount", raw)?,
        distribute_count: number(volume.dist_count.as_deref(), "distCount", raw)?,
        snapshot_count: optional_number(volume.snapshot_count.as_deref(), "snapshotCount", raw)?
            .unwrap_or_default(),
        options,
        name,
        id,
    })
}

fn convert_brick(brick: RawBrick, raw: &str) -> Result<Brick> {
    let spec = required(brick.name, "brick name", raw)?;
    let (host, path) = split_brick_spec(&spec).ok_or_else(|| {
        GlusterError::parse_near(format!("Brick 格式错误: {}", spec), raw, &spec)
    })?;

    let owner = Peer::new(
        optional_uuid(brick.host_uuid.as_deref(), raw)?,
        host,
        State::Unknown,
    );
    Ok(Brick {
        owner,
        id: optional_uuid(brick.uuid.as_deref(), raw)?,
        path: PathBuf::from(path),
        is_arbiter: flag(brick.is_arbiter.as_deref()),
    })
}

/// 将 `host:/path` 拆分为主机与路径
fn split_brick_spec(spec: &str) -> Option<(&str, &str)> {
    let idx = spec.find(":/")?;
    let (host, path) = (&spec[..idx], &spec[idx + 1..]);
    if host.is_empty() {
        return None;
    }
    Some((host, path))
}

fn required(value: Option<String>, field: &str, raw: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GlusterError::parse(format!("缺少字段 <{}>", field), raw))
}

fn number<T: std::str::FromStr>(value: Option<&str>, field: &str, raw: &str) -> Result<T> {
    let text = value
        .map(str::trim)
        .ok_or_else(|| GlusterError::parse(format!("缺少字段 <{}>", field), raw))?;
    text.parse().map_err(|_| {
        GlusterError::parse_near(
            format!("<{}> 不是合法数值: {}", field, text),
            raw,
            &format!("<{}>{}", field, text),
        )
    })
}

/// 可缺省的数值；`N/A` 与负数（gluster 用 -1 表示无）都视为 None
fn optional_number<T: std::str::FromStr>(
    value: Option<&str>,
    field: &str,
    raw: &str,
) -> Result<Option<T>> {
    match value.map(str::trim) {
        None | Some("") | Some("N/A") => Ok(None),
        Some(text) if text.starts_with('-') => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            GlusterError::parse_near(format!("<{}> 不是合法数值: {}", field, text), raw, text)
        }),
    }
}

fn optional_uuid(value: Option<&str>, raw: &str) -> Result<Option<Uuid>> {
    match value.map(str::trim) {
        None | Some("") | Some("N/A") => Ok(None),
        Some(text) => Uuid::parse_str(text)
            .map(Some)
            .map_err(|_| GlusterError::parse_near(format!("不是合法 UUID: {}", text), raw, text)),
    }
}

fn flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1"))
}

fn size(value: Option<&str>, field: &str, raw: &str) -> Result<u64> {
    let text = value
        .map(str::trim)
        .ok_or_else(|| GlusterError::parse(format!("缺少字段 <{}>", field), raw))?;
    bytes_from(text, raw)
}

fn optional_size(value: Option<&str>, raw: &str) -> Result<Option<u64>> {
    match value.map(str::trim) {
        None | Some("") | Some("N/A") => Ok(None),
        Some(text) => bytes_from(text, raw).map(Some),
    }
}

fn bytes_from(text: &str, raw: &str) -> Result<u64> {
    let bytes = to_bytes(text)
        .map_err(|_| GlusterError::parse_near(format!("无法识别的容量: {}", text), raw, text))?;
    if bytes < 0.0 {
        return Err(GlusterError::parse_near(
            format!("容量为负数: {}", text),
            raw,
            text,
        ));
    }
    Ok(bytes.round() as u64)
}
