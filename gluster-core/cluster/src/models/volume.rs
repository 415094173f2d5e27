//! 卷、Brick 与配额模型

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::peer::Peer;

/// 卷拓扑类型（对应 `typeStr`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeType {
    Distribute,
    Stripe,
    Replicate,
    StripedAndReplicate,
    Disperse,
    Tier,
    DistributedAndStripe,
    DistributedAndReplicate,
    DistributedAndStripedAndReplicate,
    DistributedAndDisperse,
}

impl VolumeType {
    const ALL: [VolumeType; 10] = [
        VolumeType::Distribute,
        VolumeType::Stripe,
        VolumeType::Replicate,
        VolumeType::StripedAndReplicate,
        VolumeType::Disperse,
        VolumeType::Tier,
        VolumeType::DistributedAndStripe,
        VolumeType::DistributedAndReplicate,
        VolumeType::DistributedAndStripedAndReplicate,
        VolumeType::DistributedAndDisperse,
    ];

    /// gluster 输出中的类型名称
    pub fn as_str(self) -> &'static str {
        match self {
            VolumeType::Distribute => "Distribute",
            VolumeType::Stripe => "Stripe",
            VolumeType::Replicate => "Replicate",
            VolumeType::StripedAndReplicate => "Striped-Replicate",
            VolumeType::Disperse => "Disperse",
            VolumeType::Tier => "Tier",
            VolumeType::DistributedAndStripe => "Distributed-Stripe",
            VolumeType::DistributedAndReplicate => "Distributed-Replicate",
            VolumeType::DistributedAndStripedAndReplicate => "Distributed-Striped-Replicate",
            VolumeType::DistributedAndDisperse => "Distributed-Disperse",
        }
    }

    /// 根据类型名称识别（忽略大小写）
    pub fn from_label(label: &str) -> Option<VolumeType> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(label))
    }

    /// 是否包含副本
    pub fn is_replicated(self) -> bool {
        matches!(
            self,
            VolumeType::Replicate
                | VolumeType::StripedAndReplicate
                | VolumeType::DistributedAndReplicate
                | VolumeType::DistributedAndStripedAndReplicate
        )
    }

    /// 是否为分布式
    pub fn is_distributed(self) -> bool {
        matches!(
            self,
            VolumeType::Distribute
                | VolumeType::DistributedAndStripe
                | VolumeType::DistributedAndReplicate
                | VolumeType::DistributedAndStripedAndReplicate
                | VolumeType::DistributedAndDisperse
        )
    }
}

impl fmt::Display for VolumeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 传输类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Tcp,
    Rdma,
    TcpAndRdma,
}

impl Transport {
    /// 命令行中的传输类型
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Rdma => "rdma",
            Transport::TcpAndRdma => "tcp,rdma",
        }
    }

    /// `volume info --xml` 中 `<transport>` 的数值编码
    pub fn from_code(code: u32) -> Option<Transport> {
        match code {
            0 => Some(Transport::Tcp),
            1 => Some(Transport::Rdma),
            2 => Some(Transport::TcpAndRdma),
            _ => None,
        }
    }

    /// 根据名称识别
    pub fn from_label(label: &str) -> Option<Transport> {
        match label.trim().to_ascii_lowercase().as_str() {
            "tcp" => Some(Transport::Tcp),
            "rdma" => Some(Transport::Rdma),
            "tcp,rdma" | "rdma,tcp" => Some(Transport::TcpAndRdma),
            _ => None,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 创建卷时的拓扑参数
///
/// 声明顺序即命令行中的输出顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VolumeTranslator {
    Stripe,
    Replica,
    Arbiter,
    Disperse,
    Redundancy,
}

impl VolumeTranslator {
    /// 命令行关键字
    pub fn as_str(self) -> &'static str {
        match self {
            VolumeTranslator::Stripe => "stripe",
            VolumeTranslator::Replica => "replica",
            VolumeTranslator::Arbiter => "arbiter",
            VolumeTranslator::Disperse => "disperse",
            VolumeTranslator::Redundancy => "redundancy",
        }
    }
}

impl fmt::Display for VolumeTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 卷中的一个 Brick
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brick {
    /// 提供该 Brick 的节点
    pub owner: Peer,
    /// gluster 报告的 Brick UUID（尚未创建时为 None）
    pub id: Option<Uuid>,
    /// 节点上的本地路径
    pub path: PathBuf,
    /// 是否为仲裁 Brick（只保存元数据）
    pub is_arbiter: bool,
}

impl Brick {
    /// 创建尚未加入卷的 Brick
    pub fn new(owner: Peer, path: impl Into<PathBuf>) -> Self {
        Self {
            owner,
            id: None,
            path: path.into(),
            is_arbiter: false,
        }
    }

    /// 命令行中的 Brick 表示（host:path 格式）
    pub fn spec(&self) -> String {
        format!("{}:{}", self.owner.host, self.path.display())
    }
}

impl fmt::Display for Brick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}

/// Gluster 卷信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// 卷名
    pub name: String,
    /// 卷 UUID
    pub id: Uuid,
    /// 拓扑类型
    pub volume_type: VolumeType,
    /// 状态（如 Started/Stopped/Created）
    pub status: String,
    /// 传输类型
    pub transport: Transport,
    /// Brick 列表，顺序与 gluster 报告一致
    pub bricks: Vec<Brick>,
    pub replica_count: u32,
    pub arbiter_count: u32,
    pub disperse_count: u32,
    pub redundancy_count: u32,
    pub stripe_count: u32,
    pub distribute_count: u32,
    pub snapshot_count: u32,
    /// 已设置的选项
    pub options: BTreeMap<String, String>,
}

impl Volume {
    /// 是否为副本卷
    pub fn is_replicated(&self) -> bool {
        self.replica_count > 1 || self.volume_type.is_replicated()
    }

    /// 是否为分布卷
    pub fn is_distributed(&self) -> bool {
        self.volume_type.is_distributed()
    }

    /// 位于指定主机上的 Brick
    pub fn bricks_on(&self, host: &str) -> Vec<&Brick> {
        self.bricks.iter().filter(|b| b.owner.host == host).collect()
    }

    /// 查找某个选项的当前值
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        self.options.get(key.as_str()).map(String::as_str)
    }
}

/// 配额超限标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitExceeded {
    Yes,
    No,
    Unknown,
}

impl LimitExceeded {
    /// 根据 gluster 输出的 Yes/No 识别
    pub fn from_label(label: Option<&str>) -> LimitExceeded {
        match label.map(|l| l.trim().to_ascii_lowercase()) {
            Some(l) if l == "yes" => LimitExceeded::Yes,
            Some(l) if l == "no" => LimitExceeded::No,
            _ => LimitExceeded::Unknown,
        }
    }
}

/// 目录配额
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// 卷内路径
    pub path: String,
    /// 硬限制（字节）
    pub hard_limit: u64,
    /// 软限制（字节）
    pub soft_limit: u64,
    /// 软限制百分比（如 `80%`）
    pub soft_limit_percentage: String,
    /// 已用（字节，尚未统计时为 None）
    pub used: Option<u64>,
    /// 可用（字节，尚未统计时为 None）
    pub available: Option<u64>,
    pub soft_limit_exceeded: LimitExceeded,
    pub hard_limit_exceeded: LimitExceeded,
}

/// 可设置的卷选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    AuthAllow,
    AuthReject,
    ClientGraceTimeout,
    ClientSsl,
    ServerSsl,
    SslCipherList,
    ClusterMinFreeDisk,
    ClusterQuorumType,
    ClusterQuorumCount,
    ClusterServerQuorumType,
    ClusterServerQuorumRatio,
    ClusterSelfHealDaemon,
    ClusterDataSelfHealAlgorithm,
    ClusterFavoriteChildPolicy,
    DiagnosticsBrickLogLevel,
    DiagnosticsClientLogLevel,
    DiagnosticsLatencyMeasurement,
    DiagnosticsCountFopHits,
    FeaturesReadOnly,
    FeaturesShard,
    FeaturesShardBlockSize,
    FeaturesQuotaDeemStatfs,
    FeaturesWorm,
    FeaturesTrash,
    NetworkPingTimeout,
    NetworkFrameTimeout,
    NfsDisable,
    NfsRpcAuthAllow,
    NfsRpcAuthReject,
    NfsExportVolumes,
    NfsAddrNamelookup,
    PerformanceCacheSize,
    PerformanceCacheMaxFileSize,
    PerformanceCacheMinFileSize,
    PerformanceCacheRefreshTimeout,
    PerformanceIoThreadCount,
    PerformanceWriteBehindWindowSize,
    PerformanceFlushBehind,
    PerformanceReadAhead,
    PerformanceQuickRead,
    PerformanceStatPrefetch,
    ServerAllowInsecure,
    ServerRootSquash,
    StorageHealthCheckInterval,
    StorageOwnerUid,
    StorageOwnerGid,
    TransportAddressFamily,
}

impl OptionKey {
    pub const ALL: [OptionKey; 47] = [
        OptionKey::AuthAllow,
        OptionKey::AuthReject,
        OptionKey::ClientGraceTimeout,
        OptionKey::ClientSsl,
        OptionKey::ServerSsl,
        OptionKey::SslCipherList,
        OptionKey::ClusterMinFreeDisk,
        OptionKey::ClusterQuorumType,
        OptionKey::ClusterQuorumCount,
        OptionKey::ClusterServerQuorumType,
        OptionKey::ClusterServerQuorumRatio,
        OptionKey::ClusterSelfHealDaemon,
        OptionKey::ClusterDataSelfHealAlgorithm,
        OptionKey::ClusterFavoriteChildPolicy,
        OptionKey::DiagnosticsBrickLogLevel,
        OptionKey::DiagnosticsClientLogLevel,
        OptionKey::DiagnosticsLatencyMeasurement,
        OptionKey::DiagnosticsCountFopHits,
        OptionKey::FeaturesReadOnly,
        OptionKey::FeaturesShard,
        OptionKey::FeaturesShardBlockSize,
        OptionKey::FeaturesQuotaDeemStatfs,
        OptionKey::FeaturesWorm,
        OptionKey::FeaturesTrash,
        OptionKey::NetworkPingTimeout,
        OptionKey::NetworkFrameTimeout,
        OptionKey::NfsDisable,
        OptionKey::NfsRpcAuthAllow,
        OptionKey::NfsRpcAuthReject,
        OptionKey::NfsExportVolumes,
        OptionKey::NfsAddrNamelookup,
        OptionKey::PerformanceCacheSize,
        OptionKey::PerformanceCacheMaxFileSize,
        OptionKey::PerformanceCacheMinFileSize,
        OptionKey::PerformanceCacheRefreshTimeout,
        OptionKey::PerformanceIoThreadCount,
        OptionKey::PerformanceWriteBehindWindowSize,
        OptionKey::PerformanceFlushBehind,
        OptionKey::PerformanceReadAhead,
        OptionKey::PerformanceQuickRead,
        OptionKey::PerformanceStatPrefetch,
        OptionKey::ServerAllowInsecure,
        OptionKey::ServerRootSquash,
        OptionKey::StorageHealthCheckInterval,
        OptionKey::StorageOwnerUid,
        OptionKey::StorageOwnerGid,
        OptionKey::TransportAddressFamily,
    ];

    /// 选项在命令行中的名称
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::AuthAllow => "auth.allow",
            OptionKey::AuthReject => "auth.reject",
            OptionKey::ClientGraceTimeout => "client.grace-timeout",
            OptionKey::ClientSsl => "client.ssl",
            OptionKey::ServerSsl => "server.ssl",
            OptionKey::SslCipherList => "ssl.cipher-list",
            OptionKey::ClusterMinFreeDisk => "cluster.min-free-disk",
            OptionKey::ClusterQuorumType => "cluster.quorum-type",
            OptionKey::ClusterQuorumCount => "cluster.quorum-count",
            OptionKey::ClusterServerQuorumType => "cluster.server-quorum-type",
            OptionKey::ClusterServerQuorumRatio => "cluster.server-quorum-ratio",
            OptionKey::ClusterSelfHealDaemon => "cluster.self-heal-daemon",
            OptionKey::ClusterDataSelfHealAlgorithm => "cluster.data-self-heal-algorithm",
            OptionKey::ClusterFavoriteChildPolicy => "cluster.favorite-child-policy",
            OptionKey::DiagnosticsBrickLogLevel => "diagnostics.brick-log-level",
            OptionKey::DiagnosticsClientLogLevel => "diagnostics.client-log-level",
            OptionKey::DiagnosticsLatencyMeasurement => "diagnostics.latency-measurement",
            OptionKey::DiagnosticsCountFopHits => "diagnostics.count-fop-hits",
            OptionKey::FeaturesReadOnly => "features.read-only",
            OptionKey::FeaturesShard => "features.shard",
            OptionKey::FeaturesShardBlockSize => "features.shard-block-size",
            OptionKey::FeaturesQuotaDeemStatfs => "features.quota-deem-statfs",
            OptionKey::FeaturesWorm => "features.worm",
            OptionKey::FeaturesTrash => "features.trash",
            OptionKey::NetworkPingTimeout => "network.ping-timeout",
            OptionKey::NetworkFrameTimeout => "network.frame-timeout",
            OptionKey::NfsDisable => "nfs.disable",
            OptionKey::NfsRpcAuthAllow => "nfs.rpc-auth-allow",
            OptionKey::NfsRpcAuthReject => "nfs.rpc-auth-reject",
            OptionKey::NfsExportVolumes => "nfs.export-volumes",
            OptionKey::NfsAddrNamelookup => "nfs.addr-namelookup",
            OptionKey::PerformanceCacheSize => "performance.cache-size",
            OptionKey::PerformanceCacheMaxFileSize => "performance.cache-max-file-size",
            OptionKey::PerformanceCacheMinFileSize => "performance.cache-min-file-size",
            OptionKey::PerformanceCacheRefreshTimeout => "performance.cache-refresh-timeout",
            OptionKey::PerformanceIoThreadCount => "performance.io-thread-count",
            OptionKey::PerformanceWriteBehindWindowSize => "performance.write-behind-window-size",
            OptionKey::PerformanceFlushBehind => "performance.flush-behind",
            OptionKey::PerformanceReadAhead => "performance.read-ahead",
            OptionKey::PerformanceQuickRead => "performance.quick-read",
            OptionKey::PerformanceStatPrefetch => "performance.stat-prefetch",
            OptionKey::ServerAllowInsecure => "server.allow-insecure",
            OptionKey::ServerRootSquash => "server.root-squash",
            OptionKey::StorageHealthCheckInterval => "storage.health-check-interval",
            OptionKey::StorageOwnerUid => "storage.owner-uid",
            OptionKey::StorageOwnerGid => "storage.owner-gid",
            OptionKey::TransportAddressFamily => "transport.address-family",
        }
    }

    /// 根据命令行名称识别
    pub fn from_wire(key: &str) -> Option<OptionKey> {
        let key = key.trim();
        Self::ALL.iter().copied().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个待设置的卷选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlusterOption {
    pub key: OptionKey,
    pub value: String,
}

impl GlusterOption {
    pub fn new(key: OptionKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// 开关型选项（on/off）
    pub fn toggle(key: OptionKey, enabled: bool) -> Self {
        Self::new(key, if enabled { "on" } else { "off" })
    }
}

/// 位腐败扫描强度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubThrottle {
    Lazy,
    Normal,
    Aggressive,
}

/// 位腐败扫描频率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubFrequency {
    Hourly,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

/// 扫描进程控制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubControl {
    Pause,
    Resume,
}

/// `volume bitrot <name> ...` 可设置的选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitrotOption {
    ScrubThrottle(ScrubThrottle),
    ScrubFrequency(ScrubFrequency),
    Scrub(ScrubControl),
}

impl BitrotOption {
    /// 命令行中的 (关键字, 取值)
    pub fn wire_pair(self) -> (&'static str, &'static str) {
        match self {
            BitrotOption::ScrubThrottle(t) => (
                "scrub-throttle",
                match t {
                    ScrubThrottle::Lazy => "lazy",
                    ScrubThrottle::Normal => "normal",
                    ScrubThrottle::Aggressive => "aggressive",
                },
            ),
            BitrotOption::ScrubFrequency(f) => (
                "scrub-frequency",
                match f {
                    ScrubFrequency::Hourly => "hourly",
                    ScrubFrequency::Daily => "daily",
                    ScrubFrequency::Weekly => "weekly",
                    ScrubFrequency::Biweekly => "biweekly",
                    ScrubFrequency::Monthly => "monthly",
                },
            ),
            BitrotOption::Scrub(c) => (
                "scrub",
                match c {
                    ScrubControl::Pause => "pause",
                    ScrubControl::Resume => "resume",
                },
            ),
        }
    }
}

/// `vol status` 中的 Brick 进程状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickStatus {
    pub host: String,
    pub path: PathBuf,
    pub peer_id: Option<Uuid>,
    pub online: bool,
    pub tcp_port: Option<u16>,
    pub rdma_port: Option<u16>,
    pub pid: Option<u32>,
}

/// `vol status` 中的后台服务（自愈、NFS、配额等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// 服务名称（如 `Self-heal Daemon`）
    pub name: String,
    /// 所在节点
    pub host: String,
    pub peer_id: Option<Uuid>,
    pub online: bool,
    pub pid: Option<u32>,
}

/// 卷运行状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeStatus {
    pub name: String,
    pub bricks: Vec<BrickStatus>,
    pub daemons: Vec<DaemonStatus>,
}

impl VolumeStatus {
    /// 离线的 Brick
    pub fn offline_bricks(&self) -> Vec<&BrickStatus> {
        self.bricks.iter().filter(|b| !b.online).collect()
    }
}
