//! 容量单位换算
//!
//! gluster 在配额等输出中使用 `100.0MB`、`0Bytes` 这类带单位的容量，
//! 这里统一换算为字节数。每级单位为上一级的 1024 倍。

use crate::error::{GlusterError, Result};

/// 容量单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Bytes,
    KiloBytes,
    MegaBytes,
    GigaBytes,
    TeraBytes,
    PetaBytes,
    ExaBytes,
}

impl Unit {
    /// 单位阶梯，按倍数从小到大
    pub const LADDER: [Unit; 7] = [
        Unit::Bytes,
        Unit::KiloBytes,
        Unit::MegaBytes,
        Unit::GigaBytes,
        Unit::TeraBytes,
        Unit::PetaBytes,
        Unit::ExaBytes,
    ];

    /// 单位代码
    pub fn code(self) -> &'static str {
        match self {
            Unit::Bytes => "Bytes",
            Unit::KiloBytes => "KB",
            Unit::MegaBytes => "MB",
            Unit::GigaBytes => "GB",
            Unit::TeraBytes => "TB",
            Unit::PetaBytes => "PB",
            Unit::ExaBytes => "EB",
        }
    }

    /// 该单位对应的字节数
    pub fn multiplier(self) -> f64 {
        let exponent = Self::LADDER
            .iter()
            .position(|u| *u == self)
            .unwrap_or_default();
        1024f64.powi(exponent as i32)
    }

    /// 根据后缀识别单位（忽略大小写，`B` 等同于 `Bytes`）
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        if suffix.eq_ignore_ascii_case("b") {
            return Some(Unit::Bytes);
        }
        Self::LADDER
            .iter()
            .copied()
            .find(|u| u.code().eq_ignore_ascii_case(suffix))
    }
}

/// 将容量字符串换算为字节数
///
/// 无后缀时按字节处理；后缀无法识别或数值不合法时返回 [`GlusterError::InvalidSize`]。
///
/// ```
/// use gluster_cluster::to_bytes;
///
/// assert_eq!(to_bytes("1TB").unwrap(), 1099511627776.0);
/// assert_eq!(to_bytes("8.2KB").unwrap(), 8396.8);
/// ```
pub fn to_bytes(text: &str) -> Result<f64> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(text.len());
    let (number, suffix) = text.split_at(split);
    let suffix = suffix.trim();

    let value: f64 = number
        .parse()
        .map_err(|_| GlusterError::InvalidSize(text.to_string()))?;
    if !value.is_finite() {
        return Err(GlusterError::InvalidSize(text.to_string()));
    }

    let unit = if suffix.is_empty() {
        Unit::Bytes
    } else {
        Unit::from_suffix(suffix).ok_or_else(|| GlusterError::InvalidSize(text.to_string()))?
    };

    Ok(value * unit.multiplier())
}
