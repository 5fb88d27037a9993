//! 数据模型
//!
//! 通知类型目录、发送历史记录与发送请求。类型目录由存储端的种子数据定义，
//! 服务运行期间不可变；历史记录只增不改。

use chrono::{DateTime, Utc};
use notify_shared::error::{NotifyError, Result};
use serde::{Deserialize, Serialize};

/// 通知类型
///
/// `name` 在启用的类型中大小写不敏感地唯一，`rate_limit_seconds` 为
/// 滚动窗口长度，`request_limit` 为窗口内允许的最大发送次数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationType {
    pub id: i64,
    pub name: String,
    pub rate_limit_seconds: i64,
    pub request_limit: u32,
    pub enabled: bool,
}

/// 发送历史记录
///
/// `id` 由存储端分配，从 1 开始单调递增。记录嵌入发送时刻解析到的类型快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub sent_at: DateTime<Utc>,
}

/// 通知发送请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRequest {
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub user_id: i64,
}

impl SendRequest {
    /// 校验请求参数
    ///
    /// 一次性收集所有违反的规则而非遇错即返，多条违规按行拼接成一条
    /// 校验错误返回。无副作用。
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if self.message.trim().is_empty() {
            violations.push("message is required");
        }

        if self.notification_type.trim().is_empty() {
            violations.push("type is required");
        }

        if self.user_id <= 0 {
            violations.push("user id is required");
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Validation(violations.join("\n")))
        }
    }
}

/// 在类型集合中按名称查找，大小写不敏感
///
/// 用显式的 `Option` 表达「未找到」，不使用零值哨兵。
pub fn find_type_by_name<'a>(
    types: &'a [NotificationType],
    name: &str,
) -> Option<&'a NotificationType> {
    types.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
