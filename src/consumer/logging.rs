//! 日志消费者
//!
//! 逐条记录批次中的消息内容，用于验证消费链路是否打通

use async_trait::async_trait;
use tracing::info;

use super::{ApplicationConsumer, AsyncConsumer};
use crate::context::ProcessingContext;
use crate::error::Result;

/// 日志消费者
#[derive(Debug, Clone, Default)]
pub struct LoggingConsumer {
    name: String,
}

impl LoggingConsumer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_batch(&self, ctx: &ProcessingContext) {
        for message in ctx.params_batch() {
            info!(
                consumer = %self.name,
                topic = %message.topic,
                partition = message.partition,
                offset = message.offset,
                "{}",
                message.payload_text()
            );
        }
    }
}

impl ApplicationConsumer for LoggingConsumer {
    fn name(&self) -> &str {
        &self.name
    }

    fn consume(&mut self, ctx: &ProcessingContext) -> Result<()> {
        self.log_batch(ctx);
        Ok(())
    }
}

#[async_trait]
impl AsyncConsumer for LoggingConsumer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn consume(&self, ctx: &ProcessingContext) -> Result<()> {
        self.log_batch(ctx);
        Ok(())
    }
}
