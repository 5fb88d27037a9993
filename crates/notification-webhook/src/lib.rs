//! 通知 webhook 服务
//!
//! 核心准入引擎的 HTTP 入口：解析请求体、调用准入服务，
//! 并把三类结果映射为协议信号（放行 → 200，限流 → 429，失败 → 4xx/5xx）。
//! 请求解析与状态码映射全部在这一层完成，核心保持与传输无关。

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
