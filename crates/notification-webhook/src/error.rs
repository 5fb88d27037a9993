//! webhook 错误响应
//!
//! 把核心的 `NotifyError` 映射为 HTTP 状态码与统一的响应体结构。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notify_shared::error::NotifyError;
use serde_json::json;

/// HTTP 层错误包装
#[derive(Debug)]
pub struct ApiError(pub NotifyError);

impl ApiError {
    /// 返回对应的 HTTP 状态码
    ///
    /// 校验失败与类型不存在属于调用方错误；限流是独立的节流信号；
    /// 其余协作方故障统一按服务端错误处理。
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            NotifyError::Validation(_) | NotifyError::TypeNotFound { .. } => {
                StatusCode::BAD_REQUEST
            }
            NotifyError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        self.0.code()
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, code = self.error_code(), "通知请求处理失败");
            "服务内部错误，请稍后重试".to_string()
        } else {
            self.0.to_string()
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}
