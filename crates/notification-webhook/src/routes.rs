//! 路由定义

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// 构建 webhook 路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/notification", post(handlers::send_notification))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
