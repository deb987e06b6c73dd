//! 消费处理错误
//!
//! 消费回调返回的统一错误类型，携带类别、原因、详情和发生时间

use super::kind::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// 消费处理错误
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[{kind}] {reason}")]
pub struct ProcessingError {
    /// 错误类别
    pub kind: ErrorKind,
    /// 错误原因
    pub reason: String,
    /// 错误详情（可选，用于调试）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// 附加参数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
    /// 错误时间戳
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ProcessingError {
    /// 创建指定类别的错误
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            details: None,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建池化资源失效错误
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransientResource, reason)
    }

    /// 创建通用处理错误
    pub fn generic(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generic, reason)
    }

    /// 添加错误详情
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// 添加单个参数
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// 获取错误类别
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误原因
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// 是否为池化资源失效错误
    #[inline]
    pub fn is_transient(&self) -> bool {
        self.kind.is_recoverable()
    }
}

/// 消费回调的结果类型
pub type Result<T> = std::result::Result<T, ProcessingError>;
