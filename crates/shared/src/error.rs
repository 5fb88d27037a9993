//! 统一错误处理模块
//!
//! 定义通知服务所有共享的错误类型，使用 thiserror 提供良好的错误信息。
//! 协作方（存储、缓存、发送渠道）的错误原样向上传播，核心不做内部重试。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum NotifyError {
    // ==================== 校验错误 ====================
    /// 请求参数校验失败，消息包含所有违反的规则，每条一行
    #[error("{0}")]
    Validation(String),

    // ==================== 业务逻辑错误 ====================
    /// 通知类型不存在或已被禁用
    #[error("notification type '{name}' not found or disabled")]
    TypeNotFound { name: String },

    /// 滚动窗口内的发送次数已达上限，属于预期结果而非系统故障
    #[error("notification rate limit reached")]
    RateLimitExceeded { type_name: String, user_id: i64 },

    // ==================== 缓存错误 ====================
    #[error("Redis 错误: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("缓存错误: {0}")]
    Cache(String),

    // ==================== 存储错误 ====================
    #[error("存储错误: {0}")]
    Storage(String),

    // ==================== 发送渠道错误 ====================
    #[error("通知发送失败: {0}")]
    Delivery(String),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, NotifyError>;

impl NotifyError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::TypeNotFound { .. } => "TYPE_NOT_FOUND",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Redis(_) => "REDIS_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Delivery(_) => "DELIVERY_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为调用方可自行纠正的错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::TypeNotFound { .. })
    }

    /// 是否为可重试错误
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Redis(_) | Self::Cache(_) | Self::Storage(_) | Self::Delivery(_)
        )
    }
}
