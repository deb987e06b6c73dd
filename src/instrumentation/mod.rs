//! 事件总线模块
//!
//! 提供显式构造的发布/订阅总线，供消费守卫发布生命周期和错误事件

pub mod event;
pub mod logging;
pub mod monitor;

pub use event::{
    CONNECTION_FETCH_ERROR, CONSUMER_CONSUME_ERROR, CONSUMER_CONSUME_RETRY, Event, EventError,
    handler_name,
};
pub use logging::LoggingListener;
pub use monitor::{EventHandler, Monitor};
