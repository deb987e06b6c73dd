//! 问题事件监听器
//!
//! 对处理器名以问题后缀结尾的事件，取出 `error` 字段转发给通知接收方；
//! `ConsumingError` 会被拆开，原始错误与两份快照分别上报

use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, warn};

use super::sink::{Notification, NotificationSink};
use super::suffix::ProblemSuffix;
use crate::error::{ConsumingError, ProcessingError};
use crate::instrumentation::{Event, EventHandler, handler_name};

/// 问题事件监听器
pub struct ExceptionListener {
    suffixes: Vec<ProblemSuffix>,
    sink: Arc<dyn NotificationSink>,
}

impl ExceptionListener {
    /// 使用默认后缀（`_error`、`_retry`）创建监听器
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            suffixes: ProblemSuffix::defaults(),
            sink,
        }
    }

    /// 替换后缀集合
    #[must_use]
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ProblemSuffix>,
    {
        self.suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn suffixes(&self) -> &[ProblemSuffix] {
        &self.suffixes
    }

    /// 查找事件名命中的后缀
    pub fn matched_suffix(&self, event_name: &str) -> Option<&ProblemSuffix> {
        let handler = handler_name(event_name);
        self.suffixes.iter().find(|suffix| suffix.matches(&handler))
    }

    fn build_notification(
        &self,
        event: &Event,
        suffix: &ProblemSuffix,
        error: &(dyn StdError + Send + Sync + 'static),
    ) -> Notification {
        let mut notification = Notification {
            event: event.name().to_string(),
            suffix: suffix.to_string(),
            error: error.to_string(),
            kind: None,
            params: None,
            params_batch: None,
            timestamp: event.timestamp(),
        };

        if let Some(consuming) = error.downcast_ref::<ConsumingError>() {
            notification.error = consuming.original().to_string();
            notification.kind = Some(consuming.original().kind());
            notification.params = Some(consuming.params().to_string());
            notification.params_batch = Some(consuming.params_batch().to_string());
        } else if let Some(processing) = error.downcast_ref::<ProcessingError>() {
            notification.kind = Some(processing.kind());
        }
        notification
    }
}

impl EventHandler for ExceptionListener {
    fn name(&self) -> &str {
        "exception"
    }

    fn handles(&self, event_name: &str) -> bool {
        self.matched_suffix(event_name).is_some()
    }

    fn handle(&self, event: &Event) {
        let Some(suffix) = self.matched_suffix(event.name()) else {
            debug!(event = event.name(), "Event is not a problem event, ignored");
            return;
        };

        let notification = match event.error() {
            Some(error) => self.build_notification(event, suffix, &**error),
            None => {
                warn!(event = event.name(), "Problem event carries no error field");
                Notification {
                    event: event.name().to_string(),
                    suffix: suffix.to_string(),
                    error: format!("problem event `{}` carries no error field", event.name()),
                    kind: None,
                    params: None,
                    params_batch: None,
                    timestamp: event.timestamp(),
                }
            }
        };
        self.sink.notify(notification);
    }
}

impl std::fmt::Debug for ExceptionListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionListener")
            .field("suffixes", &self.suffixes)
            .finish_non_exhaustive()
    }
}
