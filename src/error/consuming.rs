//! 消费失败错误
//!
//! `ConsumingError` 保存原始错误以及失败时刻的消息与批次快照，
//! 防止错误进入通用上报工具后丢失诊断上下文

use super::processing::ProcessingError;
use serde::Serialize;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// 带上下文快照的消费失败错误
///
/// 构造后不可变，显示文本与原始错误一致
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{original}")]
pub struct ConsumingError {
    #[source]
    original: ProcessingError,
    params: String,
    params_batch: String,
}

impl ConsumingError {
    /// 创建消费失败错误
    ///
    /// # 参数
    /// * `original` - 原始错误
    /// * `params` - 当前消息的 JSON 快照
    /// * `params_batch` - 当前批次的 JSON 快照
    pub fn new(
        original: ProcessingError,
        params: impl Into<String>,
        params_batch: impl Into<String>,
    ) -> Self {
        Self {
            original,
            params: params.into(),
            params_batch: params_batch.into(),
        }
    }

    /// 原始错误
    pub fn original(&self) -> &ProcessingError {
        &self.original
    }

    /// 当前消息快照
    pub fn params(&self) -> &str {
        &self.params
    }

    /// 当前批次快照
    pub fn params_batch(&self) -> &str {
        &self.params_batch
    }

    /// 拆分为 (原始错误, 消息快照, 批次快照)
    pub fn into_parts(self) -> (ProcessingError, String, String) {
        (self.original, self.params, self.params_batch)
    }
}

/// 消费守卫对外返回的错误
///
/// 要么是重试已用尽的池化资源错误（原样传播），要么是包装后的 `ConsumingError`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsumeError {
    /// 资源池已重置并重试过一次，错误再次出现
    #[error(transparent)]
    Transient(ProcessingError),

    /// 其他错误，附带上下文快照
    #[error(transparent)]
    Consuming(#[from] ConsumingError),
}

impl ConsumeError {
    /// 获取原始错误
    pub fn original(&self) -> &ProcessingError {
        match self {
            ConsumeError::Transient(err) => err,
            ConsumeError::Consuming(err) => err.original(),
        }
    }

    /// 是否为重试用尽的资源错误
    pub fn is_transient(&self) -> bool {
        matches!(self, ConsumeError::Transient(_))
    }

    /// 获取包装错误（如果有）
    pub fn as_consuming(&self) -> Option<&ConsumingError> {
        match self {
            ConsumeError::Consuming(err) => Some(err),
            ConsumeError::Transient(_) => None,
        }
    }

    /// 转换为事件总线上传递的错误值
    ///
    /// 传递内部的具体类型，监听器可以按 `ConsumingError` 向下转型
    pub fn to_event_error(&self) -> Arc<dyn StdError + Send + Sync> {
        match self {
            ConsumeError::Transient(err) => Arc::new(err.clone()),
            ConsumeError::Consuming(err) => Arc::new(err.clone()),
        }
    }
}
