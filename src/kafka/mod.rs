//! Kafka 工具模块
//!
//! 提供基于 rdkafka 的消费者构建和受守卫保护的接收循环
//!
//! 此模块需要启用 `kafka` feature 才能使用

pub mod consumer_builder;
pub mod consumer_config;
pub mod listener;

pub use consumer_builder::build_kafka_consumer;
pub use consumer_config::KafkaConsumerConfig;
pub use listener::{GuardedKafkaConsumer, message_from_kafka};
