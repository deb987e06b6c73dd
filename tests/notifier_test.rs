//! 问题事件通知测试

use kafka_consumer_kit::context::{Message, ProcessingContext};
use kafka_consumer_kit::error::{ConsumingError, ErrorKind, ProcessingError};
use kafka_consumer_kit::instrumentation::{Event, EventHandler, Monitor, handler_name};
use kafka_consumer_kit::notifier::{ExceptionListener, ProblemSuffix};
use kafka_consumer_kit::testing::RecordingSink;
use std::sync::Arc;

fn listener() -> (ExceptionListener, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (ExceptionListener::new(sink.clone()), sink)
}

#[derive(Debug, thiserror::Error)]
#[error("socket hang up")]
struct ForeignError;

#[test]
fn test_handler_name_mapping() {
    assert_eq!(handler_name("consumer.consume.error"), "on_consumer_consume_error");
    assert_eq!(
        Event::new("connection.listener.fetch_loop.error").handler_name(),
        "on_connection_listener_fetch_loop_error"
    );
}

#[test]
fn test_handles_problem_suffixes_only() {
    let (listener, _sink) = listener();

    assert!(listener.handles("consumer.consume.error"));
    assert!(listener.handles("consumer.consume.retry"));
    assert!(listener.handles("connection.listener.fetch_loop.error"));
    assert!(!listener.handles("consumer.consume"));
    assert!(!listener.handles("app.initialized"));
    assert!(!listener.handles("consumer.errors_count"));
}

#[test]
fn test_forwards_plain_error() {
    let (listener, sink) = listener();

    listener.handle(&Event::new("connection.client.fetch.error").with_error(ForeignError));

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].event, "connection.client.fetch.error");
    assert_eq!(notifications[0].suffix, "_error");
    assert_eq!(notifications[0].error, "socket hang up");
    assert_eq!(notifications[0].kind, None);
    assert_eq!(notifications[0].params, None);
}

#[test]
fn test_unpacks_consuming_error() {
    let (listener, sink) = listener();
    let ctx = ProcessingContext::single(Message::new("orders", "payload"));
    let original = ProcessingError::generic("broken payload");
    let consuming = ConsumingError::new(original.clone(), ctx.params_json(), ctx.batch_json());

    listener.handle(&Event::new("consumer.consume.error").with_error(consuming));

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.error, original.to_string());
    assert_eq!(notification.kind, Some(ErrorKind::Generic));
    assert_eq!(notification.params.as_deref(), Some(ctx.params_json().as_str()));
    assert_eq!(notification.params_batch.as_deref(), Some(ctx.batch_json().as_str()));
}

#[test]
fn test_retry_event_carries_processing_kind() {
    let (listener, sink) = listener();

    listener.handle(
        &Event::new("consumer.consume.retry").with_error(ProcessingError::transient("stale")),
    );

    let notifications = sink.notifications();
    assert_eq!(notifications[0].suffix, "_retry");
    assert_eq!(notifications[0].kind, Some(ErrorKind::TransientResource));
}

#[test]
fn test_unmatched_event_is_ignored() {
    let (listener, sink) = listener();

    listener.handle(&Event::new("consumer.consume").with_error(ForeignError));

    assert!(sink.notifications().is_empty());
}

#[test]
fn test_problem_event_without_error_is_reported() {
    let (listener, sink) = listener();

    listener.handle(&Event::new("consumer.consume.error"));

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].error.contains("carries no error field"));
}

#[test]
fn test_custom_suffixes() {
    let sink = Arc::new(RecordingSink::new());
    let listener = ExceptionListener::new(sink.clone()).with_suffixes(["_timeout"]);

    assert_eq!(listener.suffixes(), &[ProblemSuffix::Custom("_timeout".to_string())]);
    assert!(listener.handles("connection.client.fetch.timeout"));
    assert!(!listener.handles("consumer.consume.error"));
}

#[test]
fn test_suffix_parsing() {
    assert_eq!(ProblemSuffix::from("_error"), ProblemSuffix::Error);
    assert_eq!(ProblemSuffix::from("_retry"), ProblemSuffix::Retry);
    assert!(!ProblemSuffix::from("").matches("on_consumer_consume_error"));
}

#[test]
fn test_monitor_routes_to_listener() {
    let monitor = Monitor::new();
    let sink = Arc::new(RecordingSink::new());
    monitor.subscribe(Arc::new(ExceptionListener::new(sink.clone())));

    assert_eq!(monitor.instrument(Event::new("app.initialized")), 0);
    assert_eq!(
        monitor.instrument(Event::new("consumer.consume.error").with_error(ForeignError)),
        1
    );
    assert_eq!(sink.notifications().len(), 1);
}

#[test]
fn test_monitor_shutdown_drops_listeners() {
    let monitor = Monitor::new();
    let sink = Arc::new(RecordingSink::new());
    monitor.subscribe(Arc::new(ExceptionListener::new(sink.clone())));

    assert_eq!(monitor.shutdown(), 1);
    assert!(monitor.is_closed());
    assert_eq!(monitor.listener_count(), 0);
    assert_eq!(
        monitor.instrument(Event::new("consumer.consume.error").with_error(ForeignError)),
        0
    );
    assert!(!monitor.subscribe(Arc::new(ExceptionListener::new(sink.clone()))));
    assert!(sink.notifications().is_empty());
}
