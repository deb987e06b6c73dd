//! 事件总线
//!
//! 显式构造的可观测上下文：进程启动时创建，注入到守卫和监听器，
//! 停机时调用 `shutdown` 释放所有监听器

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use super::event::Event;

/// 事件处理器 trait
///
/// 订阅时按名字注册，分发时先询问 `handles` 再调用 `handle`
pub trait EventHandler: Send + Sync {
    /// 处理器名称（用于日志）
    fn name(&self) -> &str;

    /// 是否处理此事件名
    fn handles(&self, event_name: &str) -> bool;

    /// 处理事件，不得 panic 或向上传播错误
    fn handle(&self, event: &Event);
}

/// 事件总线
#[derive(Default)]
pub struct Monitor {
    listeners: RwLock<Vec<Arc<dyn EventHandler>>>,
    closed: AtomicBool,
}

impl Monitor {
    /// 创建新的事件总线
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅监听器，总线已关闭时返回 false
    pub fn subscribe(&self, handler: Arc<dyn EventHandler>) -> bool {
        if self.is_closed() {
            debug!(listener = handler.name(), "Monitor closed, subscription ignored");
            return false;
        }
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        info!(listener = handler.name(), "Listener subscribed to monitor");
        listeners.push(handler);
        true
    }

    /// 当前监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 发布事件，返回实际处理该事件的监听器数量
    ///
    /// 分发在锁外进行，监听器内部可以再次访问总线
    pub fn instrument(&self, event: Event) -> usize {
        if self.is_closed() {
            debug!(event = event.name(), "Monitor closed, event dropped");
            return 0;
        }

        let listeners: Vec<Arc<dyn EventHandler>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut handled = 0;
        for listener in listeners.iter().filter(|l| l.handles(event.name())) {
            listener.handle(&event);
            handled += 1;
        }
        handled
    }

    /// 关闭总线，释放所有监听器，返回释放的数量
    pub fn shutdown(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = listeners.len();
        listeners.clear();
        info!(listeners = dropped, "Monitor shut down");
        dropped
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
