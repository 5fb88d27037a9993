//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use notification_service::NotificationService;
use std::sync::Arc;

/// Axum 应用共享状态
///
/// 准入服务通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}
