//! 错误处理模块
//!
//! 提供消费处理错误、带上下文快照的包装错误以及错误类型转换

pub mod consuming;
pub mod conversions;
pub mod kind;
pub mod processing;

// 重新导出公共类型
pub use consuming::{ConsumeError, ConsumingError};
pub use kind::ErrorKind;
pub use processing::{ProcessingError, Result};
