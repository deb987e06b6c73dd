//! 消费守卫
//!
//! 包装一次消费回调，按错误类别执行两级策略：
//! - 池化资源错误：重置资源池后重试一次，再次出现则原样传播
//! - 其他错误：包装为带上下文快照的 `ConsumingError`
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kafka_consumer_kit::context::{Message, ProcessingContext};
//! use kafka_consumer_kit::guard::{ConsumerGuard, NoopPool};
//!
//! let guard = ConsumerGuard::new(Arc::new(NoopPool));
//! let ctx = ProcessingContext::single(Message::new("events", "hello"));
//!
//! guard.call(&ctx, || {
//!     // 业务处理
//!     Ok(())
//! })?;
//! # Ok::<(), kafka_consumer_kit::error::ConsumeError>(())
//! ```

pub mod pool;

pub use pool::{NoopPool, ResourcePool};

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{error, warn};

use crate::consumer::{ApplicationConsumer, AsyncConsumer};
use crate::context::ProcessingContext;
use crate::error::{self, ConsumeError, ConsumingError, ErrorKind, ProcessingError};
use crate::instrumentation::{CONSUMER_CONSUME_ERROR, CONSUMER_CONSUME_RETRY, Event, Monitor};
use crate::retry::RetryState;

/// 消费守卫
///
/// 不持有可变状态，可以在多个工作线程间共享
#[derive(Clone)]
pub struct ConsumerGuard {
    pool: Arc<dyn ResourcePool>,
    monitor: Option<Arc<Monitor>>,
}

impl ConsumerGuard {
    /// 创建新的消费守卫
    ///
    /// # 参数
    /// * `pool` - 遇到池化资源错误时需要重置的资源池
    pub fn new(pool: Arc<dyn ResourcePool>) -> Self {
        Self {
            pool,
            monitor: None,
        }
    }

    /// 注入事件总线
    #[must_use]
    pub fn with_monitor(mut self, monitor: Arc<Monitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// 执行同步消费回调
    pub fn call<F>(&self, ctx: &ProcessingContext, mut callback: F) -> Result<(), ConsumeError>
    where
        F: FnMut() -> error::Result<()>,
    {
        let mut state = RetryState::new();
        loop {
            let Err(err) = callback() else {
                return Ok(());
            };
            if let ControlFlow::Break(failure) = self.on_failure(ctx, &mut state, err) {
                return Err(failure);
            }
        }
    }

    /// 执行异步消费回调
    ///
    /// 守卫本身不引入额外的挂起点，只等待回调返回的 Future
    pub async fn call_async<F, Fut>(
        &self,
        ctx: &ProcessingContext,
        mut callback: F,
    ) -> Result<(), ConsumeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = error::Result<()>>,
    {
        let mut state = RetryState::new();
        loop {
            let Err(err) = callback().await else {
                return Ok(());
            };
            if let ControlFlow::Break(failure) = self.on_failure(ctx, &mut state, err) {
                return Err(failure);
            }
        }
    }

    /// 使用守卫驱动同步消费者
    pub fn run<C>(&self, consumer: &mut C, ctx: &ProcessingContext) -> Result<(), ConsumeError>
    where
        C: ApplicationConsumer + ?Sized,
    {
        self.call(ctx, || consumer.consume(ctx))
    }

    /// 使用守卫驱动异步消费者
    pub async fn run_async<C>(&self, consumer: &C, ctx: &ProcessingContext) -> Result<(), ConsumeError>
    where
        C: AsyncConsumer + ?Sized,
    {
        self.call_async(ctx, move || consumer.consume(ctx)).await
    }

    fn on_failure(
        &self,
        ctx: &ProcessingContext,
        state: &mut RetryState,
        err: ProcessingError,
    ) -> ControlFlow<ConsumeError> {
        if state.should_recover(&err) {
            warn!(
                topic = ctx.topic(),
                error = %err,
                "Transient resource error, resetting pool and retrying once"
            );
            self.pool.reset();
            self.publish(
                Event::new(CONSUMER_CONSUME_RETRY)
                    .with_field("topic", ctx.topic())
                    .with_field("attempt", state.attempt())
                    .with_error(err),
            );
            *state = state.recover();
            return ControlFlow::Continue(());
        }

        let failure = match err.kind() {
            ErrorKind::TransientResource => ConsumeError::Transient(err),
            ErrorKind::Generic => ConsumeError::Consuming(ConsumingError::new(
                err,
                ctx.params_json(),
                ctx.batch_json(),
            )),
        };

        error!(
            topic = ctx.topic(),
            attempt = state.attempt(),
            recovery_attempted = state.recovery_attempted(),
            error = %failure,
            "Message processing failed"
        );
        self.publish(
            Event::new(CONSUMER_CONSUME_ERROR)
                .with_field("topic", ctx.topic())
                .with_field("attempt", state.attempt())
                .with_shared_error(failure.to_event_error()),
        );
        ControlFlow::Break(failure)
    }

    fn publish(&self, event: Event) {
        if let Some(monitor) = &self.monitor {
            monitor.instrument(event);
        }
    }
}
