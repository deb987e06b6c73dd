//! Kafka 消费者构建器
//!
//! 根据配置构建 rdkafka `StreamConsumer` 并订阅 Topic

use anyhow::{Context, bail};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use tracing::info;

use crate::kafka::consumer_config::KafkaConsumerConfig;

/// 构建 Kafka 消费者并订阅配置中的 Topic
///
/// # 参数
/// * `config` - 实现了 `KafkaConsumerConfig` trait 的配置对象
pub fn build_kafka_consumer(config: &dyn KafkaConsumerConfig) -> anyhow::Result<StreamConsumer> {
    let topics = config.kafka_topics();
    if topics.is_empty() {
        bail!("no kafka topics configured for consumer group {}", config.consumer_group());
    }

    let bootstrap = config.kafka_bootstrap();
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &bootstrap)
        .set("client.id", config.client_id())
        .set("group.id", config.consumer_group())
        .set("enable.partition.eof", "false")
        .set("session.timeout.ms", config.session_timeout_ms().to_string())
        .set("enable.auto.commit", config.enable_auto_commit().to_string())
        .set("auto.offset.reset", config.auto_offset_reset())
        .create()
        .context("failed to create kafka consumer")?;

    let topic_refs: Vec<&str> = topics.iter().map(String::as_str).collect();
    consumer
        .subscribe(&topic_refs)
        .with_context(|| format!("failed to subscribe to topics {:?}", topics))?;

    info!(
        bootstrap = %bootstrap,
        group = %config.consumer_group(),
        topics = ?topics,
        "Kafka consumer created and subscribed"
    );
    Ok(consumer)
}
