//! 重试状态模块
//!
//! 一次消费调用内的恢复状态：只有两个状态，
//! 仅在首次尝试遇到池化资源错误时前进一次

use crate::error::ProcessingError;

/// 单次调用的重试状态
///
/// 每次调用重新创建，不跨调用保存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryState {
    /// 首次尝试
    #[default]
    InitialAttempt,
    /// 已重置资源池，正在进行唯一一次重试
    RecoveredRetry,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否应当重置资源池并重试
    pub fn should_recover(&self, error: &ProcessingError) -> bool {
        *self == RetryState::InitialAttempt && error.is_transient()
    }

    /// 标记已尝试恢复
    #[must_use]
    pub fn recover(self) -> Self {
        RetryState::RecoveredRetry
    }

    /// 是否已尝试过恢复
    pub fn recovery_attempted(&self) -> bool {
        *self == RetryState::RecoveredRetry
    }

    /// 当前尝试序号（从 1 开始）
    pub fn attempt(&self) -> u32 {
        match self {
            RetryState::InitialAttempt => 1,
            RetryState::RecoveredRetry => 2,
        }
    }
}
