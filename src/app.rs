//! 应用启动
//!
//! 根据配置创建事件总线、订阅监听器并构建消费守卫；
//! 进程退出前调用 `App::shutdown` 释放总线上的监听器

use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::guard::{ConsumerGuard, NoopPool, ResourcePool};
use crate::instrumentation::{EventHandler, LoggingListener, Monitor};
use crate::notifier::{ExceptionListener, NotificationSink, TracingSink};

/// 已启动的应用
pub struct App {
    config: Config,
    monitor: Arc<Monitor>,
    guard: ConsumerGuard,
}

/// 应用构建器
pub struct AppBuilder {
    config: Config,
    pool: Option<Arc<dyn ResourcePool>>,
    sink: Option<Arc<dyn NotificationSink>>,
    listeners: Vec<Arc<dyn EventHandler>>,
}

impl AppBuilder {
    /// 设置需要在池化资源错误时重置的资源池
    #[must_use]
    pub fn pool(mut self, pool: Arc<dyn ResourcePool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// 设置问题通知接收方，默认写入 tracing 日志
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// 追加自定义监听器
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn EventHandler>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// 启动应用
    pub fn boot(self) -> App {
        let monitor = Arc::new(Monitor::new());
        monitor.subscribe(Arc::new(LoggingListener::new()));

        let notifier_active = self.config.notifier_active();
        if notifier_active {
            let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
            let listener = ExceptionListener::new(sink)
                .with_suffixes(self.config.notifier.problem_suffixes.clone());
            monitor.subscribe(Arc::new(listener));
        }

        for listener in self.listeners {
            monitor.subscribe(listener);
        }

        let pool = self.pool.unwrap_or_else(|| Arc::new(NoopPool));
        let guard = ConsumerGuard::new(pool).with_monitor(monitor.clone());

        info!(
            environment = %self.config.app.environment,
            client_id = %self.config.kafka.client_id,
            notifier = notifier_active,
            listeners = monitor.listener_count(),
            "Consumer application booted"
        );

        App {
            config: self.config,
            monitor,
            guard,
        }
    }
}

impl App {
    /// 创建应用构建器
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder {
            config,
            pool: None,
            sink: None,
            listeners: Vec::new(),
        }
    }

    /// 使用默认资源池和通知接收方启动应用
    pub fn boot(config: Config) -> App {
        Self::builder(config).boot()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    pub fn guard(&self) -> &ConsumerGuard {
        &self.guard
    }

    /// 关闭应用，返回释放的监听器数量
    pub fn shutdown(self) -> usize {
        let dropped = self.monitor.shutdown();
        info!(listeners = dropped, "Consumer application shut down");
        dropped
    }
}
