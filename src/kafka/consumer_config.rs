//! Kafka 消费者配置 Trait
//!
//! 定义构建 Kafka 消费者所需的配置接口，`KafkaConfig` 提供默认实现

use crate::config::KafkaConfig;

/// Kafka 消费者配置 Trait
pub trait KafkaConsumerConfig: Send + Sync {
    /// Kafka Bootstrap Servers 地址（逗号分隔）
    fn kafka_bootstrap(&self) -> String;

    /// 客户端 ID
    fn client_id(&self) -> &str;

    /// Consumer Group ID
    fn consumer_group(&self) -> &str;

    /// 订阅的 Topic 列表
    fn kafka_topics(&self) -> Vec<String>;

    /// 会话超时（毫秒），默认 30000
    fn session_timeout_ms(&self) -> u64 {
        30000
    }

    /// 是否自动提交 offset，默认 false（仅提交处理成功的消息）
    fn enable_auto_commit(&self) -> bool {
        false
    }

    /// Offset 重置策略，默认 "earliest"
    fn auto_offset_reset(&self) -> &str {
        "earliest"
    }
}

impl KafkaConsumerConfig for KafkaConfig {
    fn kafka_bootstrap(&self) -> String {
        self.bootstrap_servers()
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn consumer_group(&self) -> &str {
        self.group_id()
    }

    fn kafka_topics(&self) -> Vec<String> {
        self.topics.clone()
    }

    fn session_timeout_ms(&self) -> u64 {
        self.session_timeout_ms
    }

    fn auto_offset_reset(&self) -> &str {
        &self.auto_offset_reset
    }
}
