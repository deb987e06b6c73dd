//! 资源池重置
//!
//! 守卫遇到池化资源错误时调用 `reset`，丢弃失效连接以便重试时重新获取

use tracing::debug;

/// 可重置的资源池
///
/// `reset` 是尽力而为的同步操作，其内部失败不单独处理，
/// 会在重试的回调中以新错误的形式出现
pub trait ResourcePool: Send + Sync {
    fn reset(&self);
}

impl<F> ResourcePool for F
where
    F: Fn() + Send + Sync,
{
    fn reset(&self) {
        self()
    }
}

/// 不持有任何资源的空资源池
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPool;

impl ResourcePool for NoopPool {
    fn reset(&self) {
        debug!("No resource pool configured, reset skipped");
    }
}
