//! 问题事件后缀
//!
//! 处理器名以任一后缀结尾的事件即被视为问题事件

use serde::{Deserialize, Serialize};
use std::fmt;

/// 问题事件后缀
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProblemSuffix {
    /// `_error`
    Error,
    /// `_retry`
    Retry,
    /// 配置中追加的其他后缀
    Custom(String),
}

impl ProblemSuffix {
    /// 默认后缀集合
    pub fn defaults() -> Vec<ProblemSuffix> {
        vec![ProblemSuffix::Error, ProblemSuffix::Retry]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProblemSuffix::Error => "_error",
            ProblemSuffix::Retry => "_retry",
            ProblemSuffix::Custom(suffix) => suffix,
        }
    }

    /// 处理器名是否以此后缀结尾
    pub fn matches(&self, handler_name: &str) -> bool {
        let suffix = self.as_str();
        !suffix.is_empty() && handler_name.ends_with(suffix)
    }
}

impl From<String> for ProblemSuffix {
    fn from(value: String) -> Self {
        match value.as_str() {
            "_error" => ProblemSuffix::Error,
            "_retry" => ProblemSuffix::Retry,
            _ => ProblemSuffix::Custom(value),
        }
    }
}

impl From<&str> for ProblemSuffix {
    fn from(value: &str) -> Self {
        ProblemSuffix::from(value.to_string())
    }
}

impl From<ProblemSuffix> for String {
    fn from(value: ProblemSuffix) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ProblemSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
