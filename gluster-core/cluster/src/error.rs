//! Gluster 错误定义

use thiserror::Error;

/// Gluster 操作结果类型
pub type Result<T> = std::result::Result<T, GlusterError>;

/// 解析错误中保留的原始片段最大长度
const FRAGMENT_LIMIT: usize = 256;

/// Gluster 错误类型
#[derive(Error, Debug)]
pub enum GlusterError {
    /// 命令无法运行或以非零退出码结束
    #[error("命令执行错误: {0}")]
    Execution(#[from] gluster_executor::ExecError),

    /// 输出不是预期的结构
    #[error("解析错误: {message} (片段: {fragment})")]
    Parse {
        /// 错误描述
        message: String,
        /// 出错的原始片段
        fragment: String,
    },

    /// 命令退出成功，但 XML 中报告了失败
    #[error(
        "gluster 返回失败 (opRet {ret}, opErrno {}): {message}",
        .errno.map_or_else(|| "N/A".to_string(), |e| e.to_string())
    )]
    ToolReported {
        /// opRet
        ret: i32,
        /// opErrno，输出中缺失或不是整数时为 None
        errno: Option<i32>,
        /// opErrstr
        message: String,
    },

    /// 主机名/IP 解析失败
    #[error("地址解析失败: {0}")]
    Resolution(String),

    /// 容量字符串无法识别
    #[error("无法识别的容量: {0}")]
    InvalidSize(String),

    /// 参数不合法，命令未执行
    #[error("参数错误: {0}")]
    InvalidArgument(String),

    /// 卷不存在
    #[error("Gluster 卷不存在: {0}")]
    VolumeNotFound(String),
}

impl GlusterError {
    /// 构造解析错误，片段过长时截断
    pub fn parse(message: impl Into<String>, fragment: &str) -> Self {
        let fragment = match fragment.char_indices().nth(FRAGMENT_LIMIT) {
            Some((idx, _)) => format!("{}...", &fragment[..idx]),
            None => fragment.to_string(),
        };
        GlusterError::Parse {
            message: message.into(),
            fragment,
        }
    }

    /// 构造解析错误，片段取自 `document` 中 `needle` 附近
    ///
    /// 找不到 `needle` 时退化为文档开头。
    pub fn parse_near(message: impl Into<String>, document: &str, needle: &str) -> Self {
        let start = match document.find(needle) {
            Some(pos) if !needle.is_empty() => {
                let mut start = pos.saturating_sub(FRAGMENT_LIMIT / 2);
                while !document.is_char_boundary(start) {
                    start -= 1;
                }
                start
            }
            _ => 0,
        };
        Self::parse(message, &document[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_truncates_fragment() {
        let long = "x".repeat(1000);
        match GlusterError::parse("bad", &long) {
            GlusterError::Parse { fragment, .. } => {
                assert_eq!(fragment.len(), FRAGMENT_LIMIT + 3);
                assert!(fragment.ends_with("..."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_keeps_short_fragment() {
        let err = GlusterError::parse("missing <peerStatus>", "<cliOutput/>");
        let text = err.to_string();
        assert!(text.contains("missing <peerStatus>"));
        assert!(text.contains("<cliOutput/>"));
    }

    #[test]
    fn test_tool_reported_display() {
        let err = GlusterError::ToolReported {
            ret: -1,
            errno: Some(30800),
            message: "Volume nope does not exist".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("30800"));
        assert!(text.contains("Volume nope does not exist"));

        let err = GlusterError::ToolReported {
            ret: -1,
            errno: None,
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("opErrno N/A"));
    }

    #[test]
    fn test_parse_near_windows_around_needle() {
        let document = format!("{}<name>bad-brick</name>{}", "a".repeat(2000), "b".repeat(2000));
        match GlusterError::parse_near("bad", &document, "bad-brick") {
            GlusterError::Parse { fragment, .. } => {
                assert!(fragment.contains("<name>bad-brick</name>"));
                assert!(!fragment.starts_with("aaaa".repeat(100).as_str()));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        match GlusterError::parse_near("bad", "<cliOutput/>", "missing") {
            GlusterError::Parse { fragment, .. } => assert_eq!(fragment, "<cliOutput/>"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_near_respects_char_boundaries() {
        let document = format!("{}<hostUuid>坏值</hostUuid>", "节点".repeat(200));
        match GlusterError::parse_near("bad", &document, "坏值") {
            GlusterError::Parse { fragment, .. } => assert!(fragment.contains("坏值")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
