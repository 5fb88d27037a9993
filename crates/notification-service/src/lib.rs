//! 通知准入核心
//!
//! 接收通知发送请求，按「用户 + 通知类型」在滚动时间窗口内做限流判定，
//! 通过后交给发送渠道投递并记录发送历史。流程为
//! 校验 → 解析类型（cache-aside）→ 限流判定 → 投递 → 落库。
//!
//! 核心自身不持有可变状态，存储、缓存、发送渠道全部通过 trait 注入，
//! 并发安全由各协作方实现负责。

pub mod cache;
pub mod model;
pub mod sender;
pub mod service;
pub mod store;

pub use service::NotificationService;
