//! 通知输出
//!
//! 通知接收方只需实现 `NotificationSink`，默认实现写入 tracing 日志

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::error::ErrorKind;

/// 一条错误通知
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// 来源事件名
    pub event: String,
    /// 命中的后缀
    pub suffix: String,
    /// 错误文本（`ConsumingError` 取其原始错误）
    pub error: String,
    /// 错误类别（非处理错误时为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// 当前消息快照
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// 当前批次快照
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_batch: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// 通知接收方 trait
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 写入 tracing 日志的通知接收方
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        error!(
            event = %notification.event,
            suffix = %notification.suffix,
            kind = ?notification.kind,
            params = notification.params.as_deref().unwrap_or("null"),
            params_batch = notification.params_batch.as_deref().unwrap_or("null"),
            "Problem notification: {}",
            notification.error
        );
    }
}
