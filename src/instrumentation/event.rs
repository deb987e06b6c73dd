//! 事件定义
//!
//! 事件名使用点分格式（例如 `consumer.consume.error`），
//! 对应的处理器名为 `on_consumer_consume_error`

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::sync::Arc;
use uuid::Uuid;

/// 事件携带的错误值
pub type EventError = Arc<dyn StdError + Send + Sync>;

/// 守卫在重置资源池并准备重试时发布
pub const CONSUMER_CONSUME_RETRY: &str = "consumer.consume.retry";
/// 守卫在处理最终失败时发布
pub const CONSUMER_CONSUME_ERROR: &str = "consumer.consume.error";
/// Kafka 接收循环拉取消息失败时发布
pub const CONNECTION_FETCH_ERROR: &str = "connection.listener.fetch_loop.error";

/// 事件总线上的事件
#[derive(Debug, Clone)]
pub struct Event {
    id: Uuid,
    name: String,
    error: Option<EventError>,
    fields: Map<String, Value>,
    timestamp: DateTime<Utc>,
}

impl Event {
    /// 创建新的事件
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            error: None,
            fields: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// 附加错误
    #[must_use]
    pub fn with_error<E>(self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(error))
    }

    /// 附加已共享的错误
    #[must_use]
    pub fn with_shared_error(mut self, error: EventError) -> Self {
        self.error = Some(error);
        self
    }

    /// 附加字段
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 处理器名：`on_` 前缀加上以下划线替换点号的事件名
    pub fn handler_name(&self) -> String {
        handler_name(&self.name)
    }

    /// 事件的 `error` 字段
    pub fn error(&self) -> Option<&EventError> {
        self.error.as_ref()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 将事件名转换为处理器名
pub fn handler_name(event_name: &str) -> String {
    format!("on_{}", event_name.replace('.', "_"))
}
