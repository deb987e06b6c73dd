//! 错误类型转换实现
//!
//! 在错误产生处决定类别：连接被断开、池中连接已失效等归为 `TransientResource`

use super::{ErrorKind, ProcessingError};
use std::io;

impl From<io::Error> for ProcessingError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected => ErrorKind::TransientResource,
            _ => ErrorKind::Generic,
        };
        ProcessingError::new(kind, format!("IO 错误: {}", err))
    }
}

impl From<serde_json::Error> for ProcessingError {
    fn from(err: serde_json::Error) -> Self {
        ProcessingError::generic(format!("JSON 序列化错误: {}", err))
    }
}

impl From<redis::RedisError> for ProcessingError {
    fn from(err: redis::RedisError) -> Self {
        let kind = if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error()
        {
            ErrorKind::TransientResource
        } else {
            ErrorKind::Generic
        };
        ProcessingError::new(kind, format!("Redis 错误: {}", err))
            .with_details(format!("{:?}", err.kind()))
    }
}
