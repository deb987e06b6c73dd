//! 问题事件通知模块
//!
//! 订阅事件总线，将名称以问题后缀结尾的事件转发给通知接收方

pub mod listener;
pub mod sink;
pub mod suffix;

pub use listener::ExceptionListener;
pub use sink::{Notification, NotificationSink, TracingSink};
pub use suffix::ProblemSuffix;
