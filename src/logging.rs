//! 日志初始化
//!
//! `RUST_LOG` 优先于配置中的日志级别

use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// 初始化全局 tracing 订阅者
///
/// 重复初始化返回错误
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init(),
    }
    .map_err(|err| anyhow!("failed to initialize tracing subscriber: {err}"))?;

    tracing::info!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}
