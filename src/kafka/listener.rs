//! Kafka 接收循环
//!
//! 逐条接收消息，转换为 `ProcessingContext` 后交给守卫执行，
//! 仅在处理成功后提交 offset

use std::sync::Arc;

use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Headers, Message as _};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::consumer::AsyncConsumer;
use crate::context::{Message, ProcessingContext};
use crate::error::ProcessingError;
use crate::guard::ConsumerGuard;
use crate::instrumentation::{CONNECTION_FETCH_ERROR, Event, Monitor};

/// 将 rdkafka 消息转换为上下文消息
///
/// 内容优先按 JSON 解析，失败时按 UTF-8 文本保存
pub fn message_from_kafka(message: &BorrowedMessage<'_>) -> Message {
    let payload = match message.payload() {
        Some(bytes) => serde_json::from_slice(bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }),
        None => serde_json::Value::Null,
    };

    let mut converted = Message::new(message.topic(), payload)
        .with_partition(message.partition())
        .with_offset(message.offset());
    if let Some(key) = message.key() {
        converted = converted.with_key(String::from_utf8_lossy(key));
    }
    if let Some(headers) = message.headers() {
        for header in headers.iter() {
            let value = header
                .value
                .map(|v| String::from_utf8_lossy(v).into_owned())
                .unwrap_or_default();
            converted = converted.with_header(header.key, value);
        }
    }
    converted
}

/// 受守卫保护的 Kafka 消费者
pub struct GuardedKafkaConsumer<C> {
    consumer: StreamConsumer,
    guard: ConsumerGuard,
    monitor: Arc<Monitor>,
    handler: C,
}

impl<C> GuardedKafkaConsumer<C>
where
    C: AsyncConsumer,
{
    pub fn new(
        consumer: StreamConsumer,
        guard: ConsumerGuard,
        monitor: Arc<Monitor>,
        handler: C,
    ) -> Self {
        Self {
            consumer,
            guard,
            monitor,
            handler,
        }
    }

    /// 运行接收循环直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: oneshot::Receiver<()>) -> anyhow::Result<()> {
        info!(consumer = self.handler.name(), "Kafka consume loop started");
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!(consumer = self.handler.name(), "Kafka consume loop shutting down");
                    return Ok(());
                }
                received = self.consumer.recv() => match received {
                    Ok(borrowed) => self.process(&borrowed).await,
                    Err(err) => {
                        warn!(error = %err, "Failed to fetch message from Kafka");
                        self.monitor.instrument(
                            Event::new(CONNECTION_FETCH_ERROR)
                                .with_error(ProcessingError::generic(err.to_string())),
                        );
                    }
                }
            }
        }
    }

    async fn process(&self, borrowed: &BorrowedMessage<'_>) {
        let ctx = ProcessingContext::single(message_from_kafka(borrowed));
        match self.guard.run_async(&self.handler, &ctx).await {
            Ok(()) => {
                if let Err(err) = self.consumer.commit_message(borrowed, CommitMode::Async) {
                    warn!(error = %err, offset = borrowed.offset(), "Failed to commit offset");
                } else {
                    debug!(
                        topic = borrowed.topic(),
                        partition = borrowed.partition(),
                        offset = borrowed.offset(),
                        "Offset committed"
                    );
                }
            }
            Err(err) => {
                warn!(
                    topic = borrowed.topic(),
                    partition = borrowed.partition(),
                    offset = borrowed.offset(),
                    transient = err.is_transient(),
                    "Message left uncommitted after processing failure"
                );
            }
        }
    }
}
