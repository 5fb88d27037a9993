//! 请求处理器

use axum::Json;
use axum::extract::State;
use notification_service::model::SendRequest;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /webhook/notification
///
/// 接收发送请求并交给准入引擎，放行时返回新建记录的 id。
pub async fn send_notification(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> Result<Json<Value>, ApiError> {
    let record = state.service.send(&req).await?;

    Ok(Json(json!({
        "success": true,
        "code": "OK",
        "message": "notification sent",
        "data": { "record_id": record.id }
    })))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
