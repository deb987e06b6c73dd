//! 错误类别定义
//!
//! 错误类别在错误产生处一次性确定，下游只需对类别做 `match`

use serde::{Deserialize, Serialize};
use std::fmt;

/// 处理错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 池化资源失效（例如数据库连接已陈旧），重置资源池后可恢复
    TransientResource,
    /// 其他任意处理失败，不重试
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorKind {
    /// 获取类别的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransientResource => "TRANSIENT_RESOURCE",
            ErrorKind::Generic => "GENERIC",
        }
    }

    /// 判断是否可以通过重置资源池恢复
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::TransientResource)
    }
}
