//! 日志初始化测试
//!
//! 全局订阅者只能安装一次，因此放在独立的测试二进制中

use kafka_consumer_kit::config::{LogFormat, LoggingConfig};
use kafka_consumer_kit::logging::init_tracing;

#[test]
fn test_init_tracing_only_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
    };

    assert!(init_tracing(&config).is_ok());

    let err = init_tracing(&config).unwrap_err();
    assert!(err.to_string().contains("failed to initialize tracing subscriber"));
}
