//! 卷操作
//!
//! 变更类命令以脚本模式执行（跳过 y/n 确认）；配额、位腐败开关与所有查询不使用脚本模式。

use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::command::{args, GlusterCli};
use crate::error::{GlusterError, Result};
use crate::models::{
    BitrotOption, Brick, GlusterOption, Quota, Transport, Volume, VolumeStatus, VolumeTranslator,
};
use crate::parser::{parse_quota_list, parse_volume_info, parse_volume_list, parse_volume_status};

/// 卷客户端
#[derive(Clone)]
pub struct VolumeClient {
    cli: GlusterCli,
}

impl VolumeClient {
    pub(crate) fn new(cli: GlusterCli) -> Self {
        Self { cli }
    }

    // ========== 创建 ==========

    /// 创建卷
    ///
    /// `bricks` 须已按期望顺序排好（见 [`crate::brick_and_server_cartesian_product`]）。
    /// 空 Brick 列表或重复的 `host:path` 会在执行前被拒绝。
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `topology` - 拓扑参数，如 `replica` -> `3`，按键的顺序生成命令行
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    ///
    /// # Returns
    /// 参数不合法时返回 [`GlusterError::InvalidArgument`]，此时不会执行任何命令
    pub async fn create(
        &self,
        name: &str,
        topology: &BTreeMap<VolumeTranslator, String>,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let name = checked_name(name)?;
        check_bricks(bricks)?;

        let mut args = args!["volume", "create", name];
        for (translator, value) in topology {
            args.push(translator.as_str().to_string());
            args.push(value.clone());
        }
        args.push("transport".to_string());
        args.push(transport.as_str().to_string());
        args.extend(bricks.iter().map(Brick::spec));
        if force {
            args.push("force".to_string());
        }

        info!("创建卷 {}: {} 个 Brick", name, bricks.len());
        self.cli.run(args, true).await?;
        Ok(())
    }

    /// 分布卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_distributed(
        &self,
        name: &str,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        self.create(name, &BTreeMap::new(), transport, bricks, force)
            .await
    }

    /// 副本卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `replica` - 副本数
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_replicated(
        &self,
        name: &str,
        replica: u32,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let topology = topology(&[(VolumeTranslator::Replica, replica)]);
        self.create(name, &topology, transport, bricks, force).await
    }

    /// 仲裁副本卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `replica` - 副本数（含仲裁 Brick）
    /// * `arbiter` - 每组中的仲裁 Brick 数
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_arbiter(
        &self,
        name: &str,
        replica: u32,
        arbiter: u32,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let topology = topology(&[
            (VolumeTranslator::Replica, replica),
            (VolumeTranslator::Arbiter, arbiter),
        ]);
        self.create(name, &topology, transport, bricks, force).await
    }

    /// 条带卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `stripe` - 条带数
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_striped(
        &self,
        name: &str,
        stripe: u32,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let topology = topology(&[(VolumeTranslator::Stripe, stripe)]);
        self.create(name, &topology, transport, bricks, force).await
    }

    /// 条带副本卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `stripe` - 条带数
    /// * `replica` - 副本数
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_striped_replicated(
        &self,
        name: &str,
        stripe: u32,
        replica: u32,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let topology = topology(&[
            (VolumeTranslator::Stripe, stripe),
            (VolumeTranslator::Replica, replica),
        ]);
        self.create(name, &topology, transport, bricks, force).await
    }

    /// 纠删码卷
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `disperse` - 分散数（每组 Brick 数）
    /// * `redundancy` - 冗余数（可容忍丢失的 Brick 数）
    /// * `transport` - 传输类型
    /// * `bricks` - Brick 列表，顺序即副本/条带分组顺序
    /// * `force` - 是否附加 `force`
    pub async fn create_erasure(
        &self,
        name: &str,
        disperse: u32,
        redundancy: u32,
        transport: Transport,
        bricks: &[Brick],
        force: bool,
    ) -> Result<()> {
        let topology = topology(&[
            (VolumeTranslator::Disperse, disperse),
            (VolumeTranslator::Redundancy, redundancy),
        ]);
        self.create(name, &topology, transport, bricks, force).await
    }

    // ========== 生命周期 ==========

    /// 删除卷
    pub async fn delete(&self, name: &str) -> Result<()> {
        let name = checked_name(name)?;
        info!("删除卷: {}", name);
        self.cli.run(args!["volume", "delete", name], true).await?;
        Ok(())
    }

    /// 启动卷
    pub async fn start(&self, name: &str, force: bool) -> Result<()> {
        self.lifecycle("start", name, force).await
    }

    /// 停止卷
    pub async fn stop(&self, name: &str, force: bool) -> Result<()> {
        self.lifecycle("stop", name, force).await
    }

    async fn lifecycle(&self, action: &str, name: &str, force: bool) -> Result<()> {
        let name = checked_name(name)?;
        info!("{} 卷: {} (force={})", action, name, force);
        let mut args = args!["volume", action, name];
        if force {
            args.push("force".to_string());
        }
        self.cli.run(args, true).await?;
        Ok(())
    }

    /// 启动再平衡，不等待完成
    pub async fn rebalance(&self, name: &str) -> Result<()> {
        let name = checked_name(name)?;
        info!("启动再平衡: {}", name);
        self.cli
            .run(args!["volume", "rebalance", name, "start"], true)
            .await?;
        Ok(())
    }

    /// 扩容
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `bricks` - 新增的 Brick，数量须是副本/分散数的整数倍
    /// * `force` - 是否附加 `force`
    pub async fn add_brick(&self, name: &str, bricks: &[Brick], force: bool) -> Result<()> {
        let name = checked_name(name)?;
        check_bricks(bricks)?;
        let mut args = args!["volume", "add-brick", name];
        args.extend(bricks.iter().map(Brick::spec));
        if force {
            args.push("force".to_string());
        }
        info!("卷 {} 添加 {} 个 Brick", name, bricks.len());
        self.cli.run(args, true).await?;
        Ok(())
    }

    /// 缩容
    ///
    /// 非 force 时以 `start` 发起数据迁移，迁移完成后需调用方自行 commit。
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `bricks` - 要移除的 Brick
    /// * `force` - `true` 时直接移除（`force`），不迁移数据
    pub async fn remove_brick(&self, name: &str, bricks: &[Brick], force: bool) -> Result<()> {
        let name = checked_name(name)?;
        check_bricks(bricks)?;
        let mut args = args!["volume", "remove-brick", name];
        args.extend(bricks.iter().map(Brick::spec));
        args.push(if force { "force" } else { "start" }.to_string());
        info!("卷 {} 移除 {} 个 Brick (force={})", name, bricks.len(), force);
        self.cli.run(args, true).await?;
        Ok(())
    }

    // ========== 配额 ==========

    /// 开启配额
    pub async fn enable_quotas(&self, name: &str) -> Result<()> {
        self.quota_toggle(name, "enable").await
    }

    /// 关闭配额
    pub async fn disable_quotas(&self, name: &str) -> Result<()> {
        self.quota_toggle(name, "disable").await
    }

    async fn quota_toggle(&self, name: &str, action: &str) -> Result<()> {
        let name = checked_name(name)?;
        info!("卷 {} 配额: {}", name, action);
        self.cli
            .run(args!["volume", "quota", name, action], false)
            .await?;
        Ok(())
    }

    /// 设置目录配额
    ///
    /// # Arguments
    /// * `name` - 卷名
    /// * `path` - 卷内绝对路径，如 `/` 或 `/data`
    /// * `bytes` - 硬限制（字节），可由 [`crate::to_bytes`] 换算得到
    pub async fn add_quota(&self, name: &str, path: &str, bytes: u64) -> Result<()> {
        let name = checked_name(name)?;
        let path = checked_path(path)?;
        info!("卷 {} 设置配额: {} = {} 字节", name, path, bytes);
        self.cli
            .run(
                args!["volume", "quota", name, "limit-usage", path, bytes],
                false,
            )
            .await?;
        Ok(())
    }

    /// 删除目录配额
    pub async fn remove_quota(&self, name: &str, path: &str) -> Result<()> {
        let name = checked_name(name)?;
        let path = checked_path(path)?;
        info!("卷 {} 删除配额: {}", name, path);
        self.cli
            .run(args!["volume", "quota", name, "remove", path], false)
            .await?;
        Ok(())
    }

    /// 配额列表
    pub async fn quota_list(&self, name: &str) -> Result<Vec<Quota>> {
        let name = checked_name(name)?;
        let output = self
            .cli
            .query(args!["volume", "quota", name, "list", "--xml"])
            .await?;
        parse_quota_list(&output)
    }

    // ========== 位腐败检测 ==========

    /// 开启位腐败检测
    pub async fn enable_bitrot(&self, name: &str) -> Result<()> {
        self.bitrot(name, "enable", None).await
    }

    /// 关闭位腐败检测
    pub async fn disable_bitrot(&self, name: &str) -> Result<()> {
        self.bitrot(name, "disable", None).await
    }

    /// 设置扫描参数
    pub async fn set_bitrot_option(&self, name: &str, option: BitrotOption) -> Result<()> {
        let (key, value) = option.wire_pair();
        self.bitrot(name, key, Some(value)).await
    }

    async fn bitrot(&self, name: &str, action: &str, value: Option<&str>) -> Result<()> {
        let name = checked_name(name)?;
        let mut args = args!["volume", "bitrot", name, action];
        if let Some(value) = value {
            args.push(value.to_string());
        }
        info!("卷 {} 位腐败检测: {}", name, args[3..].join(" "));
        self.cli.run(args, false).await?;
        Ok(())
    }

    // ========== 选项 ==========

    /// 设置卷选项
    pub async fn set_option(&self, name: &str, option: &GlusterOption) -> Result<()> {
        let name = checked_name(name)?;
        if option.value.trim().is_empty() {
            return Err(GlusterError::InvalidArgument(format!(
                "选项 {} 的值为空",
                option.key
            )));
        }
        info!("卷 {} 设置 {} = {}", name, option.key, option.value);
        self.cli
            .run(
                args!["volume", "set", name, option.key.as_str(), option.value],
                true,
            )
            .await?;
        Ok(())
    }

    /// 依次设置多个选项，遇到第一个失败即停止
    pub async fn set_options(&self, name: &str, options: &[GlusterOption]) -> Result<()> {
        for option in options {
            self.set_option(name, option).await?;
        }
        Ok(())
    }

    // ========== 查询 ==========

    /// 所有卷的详细信息
    pub async fn info(&self) -> Result<Vec<Volume>> {
        let output = self.cli.query(args!["volume", "info", "--xml"]).await?;
        parse_volume_info(&output)
    }

    /// 单个卷的详细信息
    pub async fn volume_info(&self, name: &str) -> Result<Volume> {
        let name = checked_name(name)?;
        let output = self
            .cli
            .query(args!["volume", "info", name, "--xml"])
            .await?;
        parse_volume_info(&output)?
            .into_iter()
            .find(|v| v.name == name)
            .ok_or_else(|| GlusterError::VolumeNotFound(name.to_string()))
    }

    /// 卷名列表
    pub async fn list(&self) -> Result<Vec<String>> {
        let output = self.cli.query(args!["volume", "list", "--xml"]).await?;
        parse_volume_list(&output)
    }

    /// 卷运行状态
    pub async fn status(&self, name: &str) -> Result<VolumeStatus> {
        let name = checked_name(name)?;
        let output = self
            .cli
            .query(args!["vol", "status", name, "--xml"])
            .await?;
        parse_volume_status(&output)?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| GlusterError::VolumeNotFound(name.to_string()))
    }
}

fn topology(entries: &[(VolumeTranslator, u32)]) -> BTreeMap<VolumeTranslator, String> {
    entries
        .iter()
        .map(|(translator, count)| (*translator, count.to_string()))
        .collect()
}

fn checked_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(GlusterError::InvalidArgument(format!(
            "卷名不合法: '{}'",
            name
        )));
    }
    Ok(name)
}

fn checked_path(path: &str) -> Result<&str> {
    let path = path.trim();
    if !path.starts_with('/') {
        return Err(GlusterError::InvalidArgument(format!(
            "配额路径必须是卷内绝对路径: '{}'",
            path
        )));
    }
    Ok(path)
}

/// Brick 列表非空，且 `host:path` 不重复
fn check_bricks(bricks: &[Brick]) -> Result<()> {
    if bricks.is_empty() {
        return Err(GlusterError::InvalidArgument("Brick 列表为空".to_string()));
    }
    let mut seen = HashSet::new();
    for brick in bricks {
        if !seen.insert((brick.owner.host.as_str(), brick.path.as_path())) {
            return Err(GlusterError::InvalidArgument(format!(
                "重复的 Brick: {}",
                brick
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::command::DEFAULT_BINARY;
    use crate::models::{
        OptionKey, Peer, ScrubControl, ScrubFrequency, ScrubThrottle, State,
    };
    use crate::testing::{expect_gluster, MockRunner, OK_HEADER};

    fn client(runner: MockRunner) -> VolumeClient {
        VolumeClient::new(GlusterCli::new(Arc::new(runner), DEFAULT_BINARY))
    }

    fn bricks() -> Vec<Brick> {
        ["172.20.21.231", "172.20.21.232", "172.20.21.233"]
            .iter()
            .map(|host| Brick::new(Peer::new(None, *host, State::PeerInCluster), "/mnt/sdb"))
            .collect()
    }

    const BRICK_ARGS: [&str; 3] = [
        "172.20.21.231:/mnt/sdb",
        "172.20.21.232:/mnt/sdb",
        "172.20.21.233:/mnt/sdb",
    ];

    #[tokio::test]
    async fn test_create_replicated_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "test", "replica", "3", "transport", "tcp",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );

        client(runner)
            .create_replicated("test", 3, Transport::Tcp, &bricks(), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_arbiter_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "test", "replica", "3", "arbiter", "1", "transport", "tcp",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2], "force",
            ],
            true,
            String::new(),
        );

        client(runner)
            .create_arbiter("test", 3, 1, Transport::Tcp, &bricks(), true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_erasure_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "test", "disperse", "3", "redundancy", "1", "transport", "rdma",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );

        client(runner)
            .create_erasure("test", 3, 1, Transport::Rdma, &bricks(), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_striped_variants_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "striped", "stripe", "3", "transport", "tcp",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "sr", "stripe", "3", "replica", "2", "transport", "tcp,rdma",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "dist", "transport", "tcp",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );

        let client = client(runner);
        client
            .create_striped("striped", 3, Transport::Tcp, &bricks(), false)
            .await
            .unwrap();
        client
            .create_striped_replicated("sr", 3, 2, Transport::TcpAndRdma, &bricks(), false)
            .await
            .unwrap();
        client
            .create_distributed("dist", Transport::Tcp, &bricks(), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_topology_is_ordered() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &[
                "volume", "create", "test", "replica", "3", "arbiter", "1", "transport", "tcp",
                BRICK_ARGS[0], BRICK_ARGS[1], BRICK_ARGS[2],
            ],
            true,
            String::new(),
        );

        let mut topology = BTreeMap::new();
        topology.insert(VolumeTranslator::Arbiter, "1".to_string());
        topology.insert(VolumeTranslator::Replica, "3".to_string());
        client(runner)
            .create("test", &topology, Transport::Tcp, &bricks(), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_bad_bricks_without_running() {
        let mut runner = MockRunner::new();
        runner.expect_run().never();
        let client = client(runner);

        let result = client
            .create_distributed("test", Transport::Tcp, &[], false)
            .await;
        assert!(matches!(result, Err(GlusterError::InvalidArgument(_))));

        let mut duplicated = bricks();
        duplicated.push(duplicated[0].clone());
        let result = client
            .create_distributed("test", Transport::Tcp, &duplicated, false)
            .await;
        assert!(matches!(result, Err(GlusterError::InvalidArgument(_))));

        let result = client
            .create_distributed("", Transport::Tcp, &bricks(), false)
            .await;
        assert!(matches!(result, Err(GlusterError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_lifecycle_args() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["volume", "delete", "test"], true, String::new());
        expect_gluster(&mut runner, &["volume", "start", "test", "force"], true, String::new());
        expect_gluster(&mut runner, &["volume", "stop", "test"], true, String::new());
        expect_gluster(&mut runner, &["volume", "rebalance", "test", "start"], true, String::new());

        let client = client(runner);
        client.delete("test").await.unwrap();
        client.start("test", true).await.unwrap();
        client.stop("test", false).await.unwrap();
        client.rebalance("test").await.unwrap();
    }

    #[tokio::test]
    async fn test_brick_change_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "add-brick", "test", BRICK_ARGS[0], BRICK_ARGS[1], "force"],
            true,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &["volume", "remove-brick", "test", BRICK_ARGS[2], "start"],
            true,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &["volume", "remove-brick", "test", BRICK_ARGS[2], "force"],
            true,
            String::new(),
        );

        let all = bricks();
        let client = client(runner);
        client.add_brick("test", &all[..2], true).await.unwrap();
        client.remove_brick("test", &all[2..], false).await.unwrap();
        client.remove_brick("test", &all[2..], true).await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_args() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["volume", "quota", "test", "enable"], false, String::new());
        expect_gluster(&mut runner, &["volume", "quota", "test", "disable"], false, String::new());
        expect_gluster(
            &mut runner,
            &["volume", "quota", "test", "limit-usage", "/", "10240"],
            false,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &["volume", "quota", "test", "remove", "/"],
            false,
            String::new(),
        );

        let client = client(runner);
        client.enable_quotas("test").await.unwrap();
        client.disable_quotas("test").await.unwrap();
        client.add_quota("test", "/", 10240).await.unwrap();
        client.remove_quota("test", "/").await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_path_must_be_absolute() {
        let mut runner = MockRunner::new();
        runner.expect_run().never();
        assert!(matches!(
            client(runner).add_quota("test", "data", 1).await,
            Err(GlusterError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_bitrot_args() {
        let mut runner = MockRunner::new();
        expect_gluster(&mut runner, &["volume", "bitrot", "test", "enable"], false, String::new());
        expect_gluster(&mut runner, &["volume", "bitrot", "test", "disable"], false, String::new());
        expect_gluster(
            &mut runner,
            &["volume", "bitrot", "test", "scrub-throttle", "lazy"],
            false,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &["volume", "bitrot", "test", "scrub-frequency", "weekly"],
            false,
            String::new(),
        );
        expect_gluster(
            &mut runner,
            &["volume", "bitrot", "test", "scrub", "resume"],
            false,
            String::new(),
        );

        let client = client(runner);
        client.enable_bitrot("test").await.unwrap();
        client.disable_bitrot("test").await.unwrap();
        client
            .set_bitrot_option("test", BitrotOption::ScrubThrottle(ScrubThrottle::Lazy))
            .await
            .unwrap();
        client
            .set_bitrot_option("test", BitrotOption::ScrubFrequency(ScrubFrequency::Weekly))
            .await
            .unwrap();
        client
            .set_bitrot_option("test", BitrotOption::Scrub(ScrubControl::Resume))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_option_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "set", "test", "auth.allow", "10.0.0.*"],
            true,
            String::new(),
        );

        client(runner)
            .set_option("test", &GlusterOption::new(OptionKey::AuthAllow, "10.0.0.*"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_options_stops_at_first_failure() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "set", "test", "nfs.disable", "on"],
            true,
            String::new(),
        );
        runner
            .expect_run()
            .withf(|_, args, _, _| args == ["volume", "set", "test", "features.shard", "on"])
            .times(1)
            .returning(|_, _, _, _| {
                Err(gluster_executor::ExecError::NonZeroExit {
                    code: Some(1),
                    message: "volume set: failed".to_string(),
                })
            });

        let options = vec![
            GlusterOption::toggle(OptionKey::NfsDisable, true),
            GlusterOption::toggle(OptionKey::FeaturesShard, true),
            GlusterOption::toggle(OptionKey::PerformanceReadAhead, false),
        ];
        let result = client(runner).set_options("test", &options).await;
        assert!(matches!(result, Err(GlusterError::Execution(_))));
    }

    #[tokio::test]
    async fn test_list_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "list", "--xml"],
            false,
            format!("{}<volList><count>1</count><volume>chris</volume></volList></cliOutput>", OK_HEADER),
        );

        assert_eq!(client(runner).list().await.unwrap(), vec!["chris"]);
    }

    #[tokio::test]
    async fn test_info_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "info", "--xml"],
            false,
            include_str!("../tests/fixtures/volume_info.xml").to_string(),
        );

        let volumes = client(runner).info().await.unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name, "test");
        assert_eq!(volumes[0].bricks.len(), 3);
    }

    #[tokio::test]
    async fn test_volume_info_not_found() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "info", "nope", "--xml"],
            false,
            format!("{}<volInfo><volumes><count>0</count></volumes></volInfo></cliOutput>", OK_HEADER),
        );

        assert!(matches!(
            client(runner).volume_info("nope").await,
            Err(GlusterError::VolumeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_status_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["vol", "status", "test", "--xml"],
            false,
            format!(
                "{}<volStatus><volumes><volume><volName>test</volName><nodeCount>1</nodeCount>\
                 <node><hostname>172.20.21.231</hostname><path>/mnt/sdb</path>\
                 <peerid>39bdbbd6-5271-4c23-b405-cc0b67741ebc</peerid><status>1</status>\
                 <port>49152</port><ports><tcp>49152</tcp><rdma>N/A</rdma></ports><pid>2187</pid></node>\
                 </volume></volumes></volStatus></cliOutput>",
                OK_HEADER
            ),
        );

        let status = client(runner).status("test").await.unwrap();
        assert_eq!(status.name, "test");
        assert_eq!(status.bricks.len(), 1);
        assert_eq!(status.bricks[0].tcp_port, Some(49152));
        assert_eq!(status.bricks[0].rdma_port, None);
        assert!(status.offline_bricks().is_empty());
    }

    #[tokio::test]
    async fn test_quota_list_args() {
        let mut runner = MockRunner::new();
        expect_gluster(
            &mut runner,
            &["volume", "quota", "test", "list", "--xml"],
            false,
            format!("{}<volQuota/></cliOutput>", OK_HEADER),
        );

        assert!(client(runner).quota_list("test").await.unwrap().is_empty());
    }
}
