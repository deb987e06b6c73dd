//! 配置模块
//!
//! 从 TOML 文件加载配置，并允许环境变量覆盖：
//! - `KAFKA_SEED_BROKERS`：逗号分隔的 broker 列表
//! - `APP_ENV`：运行环境

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::notifier::ProblemSuffix;

/// broker 列表环境变量
pub const ENV_SEED_BROKERS: &str = "KAFKA_SEED_BROKERS";
/// 运行环境环境变量
pub const ENV_APP_ENV: &str = "APP_ENV";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String, // development, test, production
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaConfig {
    #[serde(default = "default_seed_brokers")]
    pub seed_brokers: Vec<String>,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Consumer Group ID，缺省时使用 client_id
    pub consumer_group: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default = "default_session_timeout_ms")]
    pub session_timeout_ms: u64,
    #[serde(default = "default_auto_offset_reset")]
    pub auto_offset_reset: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            seed_brokers: default_seed_brokers(),
            client_id: default_client_id(),
            consumer_group: None,
            topics: Vec::new(),
            session_timeout_ms: default_session_timeout_ms(),
            auto_offset_reset: default_auto_offset_reset(),
        }
    }
}

impl KafkaConfig {
    /// rdkafka 使用的 `bootstrap.servers`：去掉 `kafka://` 前缀后以逗号连接
    pub fn bootstrap_servers(&self) -> String {
        self.seed_brokers
            .iter()
            .map(|broker| broker.trim_start_matches("kafka://"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn group_id(&self) -> &str {
        self.consumer_group.as_deref().unwrap_or(&self.client_id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// 是否订阅问题事件监听器，缺省时仅在 production 环境启用
    pub enabled: Option<bool>,
    #[serde(default = "ProblemSuffix::defaults")]
    pub problem_suffixes: Vec<ProblemSuffix>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            problem_suffixes: ProblemSuffix::defaults(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_seed_brokers() -> Vec<String> {
    vec!["kafka://127.0.0.1:9092".to_string()]
}

fn default_client_id() -> String {
    "service_name".to_string()
}

fn default_session_timeout_ms() -> u64 {
    30000
}

fn default_auto_offset_reset() -> String {
    "earliest".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// 从文件加载配置并应用环境变量覆盖
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 从 TOML 文本解析配置（不应用环境变量）
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 应用环境变量覆盖
    ///
    /// # 参数
    /// * `lookup` - 环境变量读取函数，空白值视为未设置
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(brokers) = present(ENV_SEED_BROKERS) {
            self.kafka.seed_brokers = brokers
                .split(',')
                .map(str::trim)
                .filter(|broker| !broker.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(environment) = present(ENV_APP_ENV) {
            self.app.environment = environment.trim().to_string();
        }
    }

    /// 是否启用问题事件监听器
    pub fn notifier_active(&self) -> bool {
        self.notifier
            .enabled
            .unwrap_or_else(|| self.app.is_production())
    }
}
