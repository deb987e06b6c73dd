//! 应用消费者
//!
//! 所有业务消费者都实现 `ApplicationConsumer`（同步）或 `AsyncConsumer`（异步），
//! 再交给 `ConsumerGuard` 执行

pub mod logging;

pub use logging::LoggingConsumer;

use async_trait::async_trait;

use crate::context::ProcessingContext;
use crate::error::Result;

/// 同步消费者 trait
pub trait ApplicationConsumer {
    /// 消费者名称（用于日志）
    fn name(&self) -> &str;

    /// 消费当前上下文中的消息
    ///
    /// 守卫可能在资源池重置后以同一上下文再调用一次
    fn consume(&mut self, ctx: &ProcessingContext) -> Result<()>;
}

/// 异步消费者 trait
#[async_trait]
pub trait AsyncConsumer: Send + Sync {
    /// 消费者名称（用于日志）
    fn name(&self) -> &str;

    /// 消费当前上下文中的消息
    async fn consume(&self, ctx: &ProcessingContext) -> Result<()>;
}
