//! 主机名与本机地址解析
//!
//! Peer 的身份比较以地址字符串为准，因此主机名和 IP 都需要先规整为同一种表示。

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use gluster_executor::CommandRunner;
use regex::Regex;
use tracing::debug;

use crate::error::{GlusterError, Result};

/// 本机的特殊主机名
pub const LOCALHOST: &str = "localhost";

/// 正向名称解析
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostLookup: Send + Sync {
    /// 返回名称对应的全部地址
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>>;
}

/// 使用系统解析器（tokio `lookup_host`）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

#[async_trait]
impl HostLookup for SystemLookup {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((name, 0))
            .await
            .map_err(|e| GlusterError::Resolution(format!("{}: {}", name, e)))?;
        Ok(addrs.map(|a| a.ip()).collect())
    }
}

/// 本机地址提供者
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitAddress: Send + Sync {
    /// 返回本机的地址（IP 或主机名）
    async fn unit_address(&self) -> Result<String>;
}

/// 配置中写死的本机地址
#[derive(Debug, Clone)]
pub struct StaticAddress {
    address: String,
}

impl StaticAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl UnitAddress for StaticAddress {
    async fn unit_address(&self) -> Result<String> {
        Ok(self.address.clone())
    }
}

/// 通过路由表确定本机地址
///
/// 执行 `ip route get <target>` 并读取输出中的 `src <ip>`。
/// 未指定 target 时先用 `ip route show 0.0.0.0/0` 找到默认网关。
pub struct RouteAddress {
    runner: Arc<dyn CommandRunner>,
    target: Option<String>,
}

impl RouteAddress {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            target: None,
        }
    }

    /// 使用固定的探测地址，而不是默认网关
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    async fn ip(&self, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Ok(self.runner.run("ip", &args, false, false).await?)
    }

    async fn default_gateway(&self) -> Result<String> {
        // default via 192.168.1.1 dev eth0 proto static
        let output = self.ip(&["route", "show", "0.0.0.0/0"]).await?;
        capture(r"via\s+(\S+)", &output)
            .ok_or_else(|| GlusterError::Resolution(format!("未找到默认路由: {}", output.trim())))
    }
}

#[async_trait]
impl UnitAddress for RouteAddress {
    async fn unit_address(&self) -> Result<String> {
        let target = match &self.target {
            Some(target) => target.clone(),
            None => self.default_gateway().await?,
        };

        // 192.168.1.1 dev eth0 src 192.168.1.7 uid 0
        let output = self.ip(&["route", "get", &target]).await?;
        let src = capture(r"src\s+(\S+)", &output).ok_or_else(|| {
            GlusterError::Resolution(format!("路由输出中没有 src: {}", output.trim()))
        })?;
        debug!("路由到 {} 的源地址为 {}", target, src);
        Ok(src)
    }
}

fn capture(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// 地址解析器
#[derive(Clone)]
pub struct Resolver {
    lookup: Arc<dyn HostLookup>,
    unit: Arc<dyn UnitAddress>,
}

impl Resolver {
    /// 使用指定的名称解析与本机地址提供者
    pub fn new(lookup: Arc<dyn HostLookup>, unit: Arc<dyn UnitAddress>) -> Self {
        Self { lookup, unit }
    }

    /// 使用系统解析器
    pub fn system(unit: Arc<dyn UnitAddress>) -> Self {
        Self::new(Arc::new(SystemLookup), unit)
    }

    /// 将名称解析为 IP
    ///
    /// `localhost` 直接返回 [`Resolver::local_ip`]，不做任何名称解析；
    /// IP 字面量原样返回；其他名称取解析结果中的第一个地址。
    pub async fn resolve_to_ip(&self, name: &str) -> Result<IpAddr> {
        let name = name.trim();
        if name.eq_ignore_ascii_case(LOCALHOST) {
            debug!("主机名为 localhost，使用本机地址");
            return self.local_ip().await;
        }
        self.normalize(name).await
    }

    /// 本机地址
    pub async fn local_ip(&self) -> Result<IpAddr> {
        let address = self.unit.unit_address().await?;
        let address = address.trim();
        if address.is_empty() || address.eq_ignore_ascii_case(LOCALHOST) {
            return Err(GlusterError::Resolution(format!(
                "本机地址无效: '{}'",
                address
            )));
        }
        self.normalize(address).await
    }

    async fn normalize(&self, name: &str) -> Result<IpAddr> {
        if let Ok(ip) = name.parse::<IpAddr>() {
            return Ok(ip);
        }
        let addrs = self.lookup.lookup(name).await?;
        let first = addrs
            .into_iter()
            .next()
            .ok_or_else(|| GlusterError::Resolution(format!("{} 没有解析结果", name)))?;
        debug!("{} 解析为 {}", name, first);
        Ok(first)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
