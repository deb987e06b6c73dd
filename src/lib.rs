//! Kafka Consumer Kit
//!
//! Provides a uniform error-handling contract for application-level Kafka consumers:
//! a guard that retries once after resetting a stale resource pool, a diagnostic
//! consuming error carrying message and batch snapshots, an explicitly constructed
//! instrumentation bus and a problem-event notifier.

pub mod app;
pub mod config;
pub mod consumer;
pub mod context;
pub mod error;
pub mod guard;
pub mod instrumentation;
pub mod logging;
pub mod notifier;
pub mod retry;
pub mod testing;

// Kafka 工具模块（可选）
#[cfg(feature = "kafka")]
pub mod kafka;

// Re-exports
pub use app::{App, AppBuilder};
pub use config::{Config, KafkaConfig, LogFormat, LoggingConfig, NotifierConfig};
pub use consumer::{ApplicationConsumer, AsyncConsumer, LoggingConsumer};
pub use context::{Message, ProcessingContext};
pub use error::{ConsumeError, ConsumingError, ErrorKind, ProcessingError, Result};
pub use guard::{ConsumerGuard, NoopPool, ResourcePool};
pub use instrumentation::{Event, EventHandler, LoggingListener, Monitor};
pub use logging::init_tracing;
pub use notifier::{ExceptionListener, Notification, NotificationSink, ProblemSuffix, TracingSink};
pub use retry::RetryState;

// Kafka 工具 re-exports（可选）
#[cfg(feature = "kafka")]
pub use kafka::{GuardedKafkaConsumer, KafkaConsumerConfig, build_kafka_consumer};
