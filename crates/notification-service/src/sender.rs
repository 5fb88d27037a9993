//! 通知发送器
//!
//! 通过 `Sender` trait 抽象投递行为，具体网关（邮件、短信、推送）各自实现。
//! 当前提供模拟实现 `LogSender`（仅记录日志），便于在无外部依赖的情况下
//! 验证准入管道的完整性。替换为真实 SDK 调用时只需实现同一 trait。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use notify_shared::error::Result;
use tracing::info;
use uuid::Uuid;

/// 发送契约
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Sender: Send + Sync {
    /// 向指定用户投递一条通知消息
    async fn send(&self, user_id: i64, message: &str) -> Result<()>;
}

/// 模拟网关发送器
///
/// 生产环境中替换为真实渠道（APNs / FCM / SMTP 等）的 SDK 调用
pub struct LogSender;

#[async_trait]
impl Sender for LogSender {
    async fn send(&self, user_id: i64, message: &str) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        info!(
            user_id,
            message_id = %message_id,
            message,
            "模拟发送通知"
        );

        Ok(())
    }
}
