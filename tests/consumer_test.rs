//! 消费者与应用启动测试

use kafka_consumer_kit::app::App;
use kafka_consumer_kit::config::Config;
use kafka_consumer_kit::consumer::{ApplicationConsumer, LoggingConsumer};
use kafka_consumer_kit::context::ProcessingContext;
use kafka_consumer_kit::error::{ErrorKind, ProcessingError, Result};
use kafka_consumer_kit::testing::{ConsumerHarness, CountingPool, RecordingListener, RecordingSink};
use std::io;
use std::sync::{Arc, Mutex};

/// 共享缓冲区，用于捕获日志输出
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// 第一次调用返回连接失效错误的消费者
struct FlakyConsumer {
    calls: usize,
}

impl ApplicationConsumer for FlakyConsumer {
    fn name(&self) -> &str {
        "flaky"
    }

    fn consume(&mut self, _ctx: &ProcessingContext) -> Result<()> {
        self.calls += 1;
        if self.calls == 1 {
            Err(io::Error::from(io::ErrorKind::ConnectionReset).into())
        } else {
            Ok(())
        }
    }
}

/// 总是解析失败的消费者
struct BrokenConsumer;

impl ApplicationConsumer for BrokenConsumer {
    fn name(&self) -> &str {
        "broken"
    }

    fn consume(&mut self, ctx: &ProcessingContext) -> Result<()> {
        let payload = ctx.params().map(|m| m.payload_text()).unwrap_or_default();
        let _: u64 = serde_json::from_str(&payload)?;
        Ok(())
    }
}

fn production_config() -> Config {
    let mut config = Config::default();
    config.app.environment = "production".to_string();
    config
}

#[test]
fn test_logging_consumer_logs_payload() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let app = App::boot(Config::default());
    let mut harness = ConsumerHarness::for_app(&app, "test");
    harness.publish("test_message 1");

    let mut consumer = LoggingConsumer::new("dummy");
    let result = tracing::subscriber::with_default(subscriber, || harness.consume(&mut consumer));

    assert!(result.is_ok());
    assert!(buf.contents().contains("test_message 1"));
}

#[test]
fn test_harness_recovers_stale_connection() {
    let pool = Arc::new(CountingPool::new());
    let app = App::builder(Config::default()).pool(pool.clone()).boot();
    let mut harness = ConsumerHarness::for_app(&app, "orders");
    harness.publish(serde_json::json!({"id": 7}));

    let mut consumer = FlakyConsumer { calls: 0 };
    assert!(harness.consume(&mut consumer).is_ok());
    assert_eq!(consumer.calls, 2);
    assert_eq!(pool.resets(), 1);
}

#[test]
fn test_production_app_notifies_consuming_error() {
    let sink = Arc::new(RecordingSink::new());
    let app = App::builder(production_config()).sink(sink.clone()).boot();
    let mut harness = ConsumerHarness::for_app(&app, "orders");
    harness.publish("not a number").publish("42");

    let err = harness.consume(&mut BrokenConsumer).unwrap_err();
    assert_eq!(err.original().kind(), ErrorKind::Generic);

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].event, "consumer.consume.error");
    assert_eq!(notifications[0].params.as_deref(), Some(harness.context().params_json().as_str()));
    assert_eq!(
        notifications[0].params_batch.as_deref(),
        Some(harness.context().batch_json().as_str())
    );
}

#[test]
fn test_development_app_skips_notifier() {
    let sink = Arc::new(RecordingSink::new());
    let app = App::builder(Config::default()).sink(sink.clone()).boot();
    let mut harness = ConsumerHarness::for_app(&app, "orders");
    harness.publish("oops");

    assert!(harness.consume(&mut BrokenConsumer).is_err());
    assert!(sink.notifications().is_empty());
    // 仅日志监听器
    assert_eq!(app.monitor().listener_count(), 1);
}

#[test]
fn test_app_shutdown_releases_listeners() {
    let recorder = Arc::new(RecordingListener::new());
    let app = App::builder(production_config())
        .listener(recorder.clone())
        .boot();
    let monitor = app.monitor().clone();
    assert_eq!(monitor.listener_count(), 3);

    assert_eq!(app.shutdown(), 3);
    assert!(monitor.is_closed());
}

#[test]
fn test_harness_clear() {
    let app = App::boot(Config::default());
    let mut harness = ConsumerHarness::for_app(&app, "orders");
    harness.publish("a").publish("b");
    assert_eq!(harness.context().len(), 2);
    assert_eq!(harness.context().params_batch()[1].offset, 1);

    harness.clear();
    assert!(harness.context().is_empty());
    assert_eq!(harness.context().topic(), "orders");
}

#[tokio::test]
async fn test_async_logging_consumer() {
    let app = App::boot(Config::default());
    let mut harness = ConsumerHarness::for_app(&app, "test");
    harness.publish("async message");

    let consumer = LoggingConsumer::new("dummy");
    assert!(harness.consume_async(&consumer).await.is_ok());
}

#[test]
fn test_error_conversions() {
    let transient: ProcessingError = io::Error::from(io::ErrorKind::BrokenPipe).into();
    assert!(transient.is_transient());

    let generic: ProcessingError = io::Error::from(io::ErrorKind::NotFound).into();
    assert_eq!(generic.kind(), ErrorKind::Generic);

    let dropped: ProcessingError =
        redis::RedisError::from(io::Error::from(io::ErrorKind::ConnectionReset)).into();
    assert!(dropped.is_transient());

    let parse: ProcessingError = redis::RedisError::from((redis::ErrorKind::TypeError, "bad type")).into();
    assert_eq!(parse.kind(), ErrorKind::Generic);
}

#[test]
fn test_block_on_async_guard() {
    let app = App::boot(Config::default());
    let ctx = ProcessingContext::new("orders");
    let result = tokio_test::block_on(
        app.guard()
            .call_async(&ctx, || async { Err(ProcessingError::transient("stale")) }),
    );
    assert!(result.unwrap_err().is_transient());
}

