//! glusterctl - Gluster 集群管理命令行

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "glusterctl")]
#[command(about = "Gluster 集群管理 - 节点、卷、配额与位腐败检测", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 配置文件路径（默认 ~/.config/glusterctl/config.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 对等节点管理
    Peer {
        #[command(subcommand)]
        action: PeerAction,
    },

    /// 卷管理
    Volume {
        #[command(subcommand)]
        action: VolumeAction,
    },

    /// 目录配额
    Quota {
        #[command(subcommand)]
        action: QuotaAction,
    },

    /// 位腐败检测
    Bitrot {
        #[command(subcommand)]
        action: BitrotAction,
    },

    /// 将主机名解析为 IP（localhost 解析为本机地址）
    Resolve {
        /// 主机名或 IP
        name: String,
    },

    /// 将容量字符串换算为字节数（如 8.2KB）
    ToBytes {
        /// 容量
        size: String,
    },
}

/// 查询结果输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum PeerAction {
    /// 集群全部节点（pool list）
    List {
        /// 输出格式
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// 除本节点外的节点（peer status）
    Status {
        /// 输出格式
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// 按主机查找节点
    Get {
        /// 主机名或 IP
        host: String,
    },
    /// 探测节点
    Probe {
        /// 主机名或 IP
        host: String,
    },
    /// 移除节点
    Detach {
        /// 主机名或 IP
        host: String,
        /// 强制移除
        #[arg(long)]
        force: bool,
    },
    /// 批量探测，单个失败不中断
    ProbeAll {
        /// 待探测的主机
        #[arg(required = true)]
        hosts: Vec<String>,
        /// 已探测过、需要跳过的主机（逗号分隔）
        #[arg(long, value_delimiter = ',')]
        skip: Vec<String>,
    },
    /// 检查所有节点是否都已加入集群
    Ready,
}

#[derive(Subcommand)]
pub enum VolumeAction {
    /// 卷名列表
    List,
    /// 卷详细信息
    Info {
        /// 卷名（省略时显示全部）
        name: Option<String>,
        /// 输出格式
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// 卷运行状态
    Status {
        /// 卷名
        name: String,
        /// 输出格式
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// 创建卷
    Create {
        /// 卷名
        name: String,
        /// Brick 列表（host:/path，逗号分隔），与 --peers/--paths 二选一
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["peers", "paths"])]
        bricks: Vec<String>,
        /// 节点列表（逗号分隔），与 --paths 组合为 路径 × 节点 的 Brick 布局
        #[arg(long, value_delimiter = ',', requires = "paths")]
        peers: Vec<String>,
        /// 每个节点上的 Brick 路径（逗号分隔）
        #[arg(long, value_delimiter = ',', requires = "peers")]
        paths: Vec<String>,
        /// 副本数
        #[arg(long)]
        replica: Option<u32>,
        /// 仲裁 Brick 数（需配合 --replica）
        #[arg(long, requires = "replica")]
        arbiter: Option<u32>,
        /// 条带数
        #[arg(long)]
        stripe: Option<u32>,
        /// 纠删码分片数
        #[arg(long, requires = "redundancy")]
        disperse: Option<u32>,
        /// 纠删码冗余数
        #[arg(long, requires = "disperse")]
        redundancy: Option<u32>,
        /// 传输类型 (tcp/rdma/tcp,rdma)
        #[arg(long, default_value = "tcp")]
        transport: String,
        /// 强制创建
        #[arg(long)]
        force: bool,
    },
    /// 删除卷
    Delete {
        /// 卷名
        name: String,
    },
    /// 启动卷
    Start {
        /// 卷名
        name: String,
        /// 强制启动
        #[arg(long)]
        force: bool,
    },
    /// 停止卷
    Stop {
        /// 卷名
        name: String,
        /// 强制停止
        #[arg(long)]
        force: bool,
    },
    /// 启动再平衡（不等待完成）
    Rebalance {
        /// 卷名
        name: String,
    },
    /// 设置卷选项
    Set {
        /// 卷名
        name: String,
        /// 选项名（如 auth.allow）
        key: String,
        /// 选项值
        value: String,
    },
    /// 添加 Brick
    AddBrick {
        /// 卷名
        name: String,
        /// Brick 列表（host:/path）
        #[arg(required = true)]
        bricks: Vec<String>,
        /// 强制添加
        #[arg(long)]
        force: bool,
    },
    /// 移除 Brick
    RemoveBrick {
        /// 卷名
        name: String,
        /// Brick 列表（host:/path）
        #[arg(required = true)]
        bricks: Vec<String>,
        /// 强制移除（不迁移数据）
        #[arg(long)]
        force: bool,
    },
    /// 列出卷中位于本机的 Brick
    LocalBricks {
        /// 卷名
        name: String,
    },
}

#[derive(Subcommand)]
pub enum QuotaAction {
    /// 开启配额
    Enable {
        /// 卷名
        name: String,
    },
    /// 关闭配额
    Disable {
        /// 卷名
        name: String,
    },
    /// 设置目录配额
    Limit {
        /// 卷名
        name: String,
        /// 卷内路径
        path: String,
        /// 容量（如 10GB、10240）
        size: String,
    },
    /// 删除目录配额
    Remove {
        /// 卷名
        name: String,
        /// 卷内路径
        path: String,
    },
    /// 配额列表
    List {
        /// 卷名
        name: String,
        /// 输出格式
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum BitrotAction {
    /// 开启位腐败检测
    Enable {
        /// 卷名
        name: String,
    },
    /// 关闭位腐败检测
    Disable {
        /// 卷名
        name: String,
    },
    /// 设置扫描强度
    Throttle {
        /// 卷名
        name: String,
        #[arg(value_enum)]
        level: commands::bitrot::ThrottleArg,
    },
    /// 设置扫描频率
    Frequency {
        /// 卷名
        name: String,
        #[arg(value_enum)]
        every: commands::bitrot::FrequencyArg,
    },
    /// 暂停或恢复扫描
    Scrub {
        /// 卷名
        name: String,
        #[arg(value_enum)]
        control: commands::bitrot::ScrubArg,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志，RUST_LOG 优先于 --log-level
    let log_level = normalize_level(&cli.log_level);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "glusterctl={},gluster_cluster={},gluster_executor={}",
                log_level, log_level, log_level
            )
            .into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    debug!("配置: {:?}", config);

    // 处理命令
    match cli.command {
        Commands::Peer { action } => commands::peer::handle(action, &config).await?,
        Commands::Volume { action } => commands::volume::handle(action, &config).await?,
        Commands::Quota { action } => commands::quota::handle(action, &config).await?,
        Commands::Bitrot { action } => commands::bitrot::handle(action, &config).await?,
        Commands::Resolve { name } => commands::misc::resolve(&name, &config).await?,
        Commands::ToBytes { size } => commands::misc::to_bytes(&size)?,
    }

    Ok(())
}

/// 将 `--log-level` 规范为 EnvFilter 可识别的级别，未知值按 info 处理
fn normalize_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}
