//! 共享库
//!
//! 包含通知服务各组件共用的配置、错误处理、可观测性和缓存客户端代码。

pub mod cache;
pub mod config;
pub mod error;
pub mod observability;
