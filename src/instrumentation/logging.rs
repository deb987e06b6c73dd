//! 日志监听器
//!
//! 将总线上的所有事件写入 tracing 日志

use tracing::{error, info};

use super::event::Event;
use super::monitor::EventHandler;

/// 日志监听器
pub struct LoggingListener;

impl LoggingListener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for LoggingListener {
    fn name(&self) -> &str {
        "logging"
    }

    fn handles(&self, _event_name: &str) -> bool {
        true
    }

    fn handle(&self, event: &Event) {
        let fields = serde_json::Value::Object(event.fields().clone());
        match event.error() {
            Some(err) => error!(
                event = event.name(),
                event_id = %event.id(),
                error = %err,
                fields = %fields,
                "Instrumentation event with error"
            ),
            None => info!(
                event = event.name(),
                event_id = %event.id(),
                fields = %fields,
                "Instrumentation event"
            ),
        }
    }
}
