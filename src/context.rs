//! 消费上下文
//!
//! 描述一次消费调用中正在处理的消息及其所在批次，
//! 两个视图都可以序列化为 JSON 文本作为诊断快照

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// 单条消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Topic 名称
    pub topic: String,
    /// 分区
    pub partition: i32,
    /// Offset
    pub offset: i64,
    /// 消息 key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// 消息内容
    pub payload: serde_json::Value,
    /// 消息头
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// 接收时间
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub received_at: DateTime<Utc>,
}

impl Message {
    /// 创建新的消息（分区 0，offset 0）
    pub fn new(topic: impl Into<String>, payload: impl Into<serde_json::Value>) -> Self {
        Self {
            topic: topic.into(),
            partition: 0,
            offset: 0,
            key: None,
            payload: payload.into(),
            headers: BTreeMap::new(),
            received_at: Utc::now(),
        }
    }

    /// 设置分区
    #[must_use]
    pub fn with_partition(mut self, partition: i32) -> Self {
        self.partition = partition;
        self
    }

    /// 设置 offset
    #[must_use]
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// 设置 key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// 添加消息头
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// 消息内容的文本形式
    ///
    /// 字符串内容原样返回，其余内容返回 JSON 文本
    pub fn payload_text(&self) -> String {
        match &self.payload {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// 消费上下文
///
/// 由调用方持有，守卫只读
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingContext {
    topic: String,
    messages: Vec<Message>,
    current: usize,
}

impl ProcessingContext {
    /// 创建空上下文
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            messages: Vec::new(),
            current: 0,
        }
    }

    /// 从一批消息创建上下文，当前消息为第一条
    pub fn from_batch(topic: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            topic: topic.into(),
            messages,
            current: 0,
        }
    }

    /// 从单条消息创建上下文
    pub fn single(message: Message) -> Self {
        Self {
            topic: message.topic.clone(),
            messages: vec![message],
            current: 0,
        }
    }

    /// 追加一条消息
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// 切换当前消息，越界时返回 false 且不做修改
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.messages.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Topic 名称
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// 当前消息
    pub fn params(&self) -> Option<&Message> {
        self.messages.get(self.current)
    }

    /// 当前批次
    pub fn params_batch(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 当前消息的 JSON 快照，没有消息时为 `null`
    pub fn params_json(&self) -> String {
        snapshot(&self.params())
    }

    /// 当前批次的 JSON 快照
    pub fn batch_json(&self) -> String {
        snapshot(&self.messages)
    }
}

fn snapshot<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!(error = %err, "Failed to serialize processing context snapshot");
        serde_json::json!({ "snapshot_error": err.to_string() }).to_string()
    })
}
