//! 测试工具
//!
//! 提供发布后消费的测试夹具，以及记录资源池重置、事件和通知的替身

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::app::App;
use crate::consumer::{ApplicationConsumer, AsyncConsumer};
use crate::context::{Message, ProcessingContext};
use crate::error::ConsumeError;
use crate::guard::{ConsumerGuard, ResourcePool};
use crate::instrumentation::{Event, EventHandler};
use crate::notifier::{Notification, NotificationSink};

/// 记录重置次数的资源池
#[derive(Debug, Default)]
pub struct CountingPool {
    resets: AtomicUsize,
}

impl CountingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl ResourcePool for CountingPool {
    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// 记录所有通知的接收方
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// 记录所有事件的监听器
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 已记录的事件名
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|event| event.name().to_string())
            .collect()
    }
}

impl EventHandler for RecordingListener {
    fn name(&self) -> &str {
        "recording"
    }

    fn handles(&self, _event_name: &str) -> bool {
        true
    }

    fn handle(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// 消费者测试夹具
///
/// 先用 `publish` 积累一批消息，再用 `consume` 通过守卫执行消费者
pub struct ConsumerHarness {
    guard: ConsumerGuard,
    context: ProcessingContext,
    next_offset: i64,
}

impl ConsumerHarness {
    pub fn new(topic: impl Into<String>, guard: ConsumerGuard) -> Self {
        Self {
            guard,
            context: ProcessingContext::new(topic),
            next_offset: 0,
        }
    }

    /// 使用已启动应用的守卫
    pub fn for_app(app: &App, topic: impl Into<String>) -> Self {
        Self::new(topic, app.guard().clone())
    }

    /// 发布一条消息，offset 递增
    pub fn publish(&mut self, payload: impl Into<serde_json::Value>) -> &mut Self {
        let message = Message::new(self.context.topic(), payload).with_offset(self.next_offset);
        self.next_offset += 1;
        self.context.push(message);
        self
    }

    /// 清空已发布的消息
    pub fn clear(&mut self) {
        self.context = ProcessingContext::new(self.context.topic());
    }

    pub fn context(&self) -> &ProcessingContext {
        &self.context
    }

    /// 通过守卫执行同步消费者
    pub fn consume<C>(&self, consumer: &mut C) -> Result<(), ConsumeError>
    where
        C: ApplicationConsumer + ?Sized,
    {
        self.guard.run(consumer, &self.context)
    }

    /// 通过守卫执行异步消费者
    pub async fn consume_async<C>(&self, consumer: &C) -> Result<(), ConsumeError>
    where
        C: AsyncConsumer + ?Sized,
    {
        self.guard.run_async(consumer, &self.context).await
    }
}
