//! 通知存储
//!
//! `Storer` trait 定义核心依赖的存储契约：查询滚动窗口内的发送历史、
//! 读取启用的类型目录、写入发送记录。`MemoryStore` 为进程内实现，
//! 适用于单实例部署、本地开发与测试；任何持久化存储实现同一契约即可替换。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use notify_shared::error::Result;
use parking_lot::RwLock;

use crate::model::{NotificationRecord, NotificationType};

/// 存储契约
///
/// 并发安全由实现负责，核心不在调用侧加锁。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Storer: Send + Sync {
    /// 查询某用户、某类型在 `since` 之后（严格晚于）的发送记录，
    /// 类型名匹配大小写不敏感
    async fn user_notifications_since(
        &self,
        user_id: i64,
        type_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<NotificationRecord>>;

    /// 返回全部启用的通知类型，禁用类型在此层即被过滤
    async fn types(&self) -> Result<Vec<NotificationType>>;

    /// 写入一条发送记录，由实现分配 id 与 sent_at
    async fn save(
        &self,
        notif_type: &NotificationType,
        user_id: i64,
    ) -> Result<NotificationRecord>;
}

/// 进程内存储
///
/// 类型目录在构造时确定，运行期间只读；历史记录追加写入，
/// 用 `RwLock` 保护并发访问。
pub struct MemoryStore {
    types: Vec<NotificationType>,
    records: RwLock<Vec<NotificationRecord>>,
}

impl MemoryStore {
    /// 使用内置种子类型目录构造
    pub fn new() -> Self {
        Self::with_types(Self::seed_types())
    }

    /// 使用给定类型目录构造
    pub fn with_types(types: Vec<NotificationType>) -> Self {
        Self {
            types,
            records: RwLock::new(Vec::new()),
        }
    }

    /// 内置种子类型目录
    ///
    /// PROMO 为禁用状态，用于验证启用过滤。
    pub fn seed_types() -> Vec<NotificationType> {
        vec![
            NotificationType {
                id: 1,
                name: "STATUS".to_string(),
                rate_limit_seconds: 120,
                request_limit: 2,
                enabled: true,
            },
            NotificationType {
                id: 2,
                name: "NEWS".to_string(),
                rate_limit_seconds: 86400,
                request_limit: 1,
                enabled: true,
            },
            NotificationType {
                id: 3,
                name: "MARKETING".to_string(),
                rate_limit_seconds: 10800,
                request_limit: 3,
                enabled: true,
            },
            NotificationType {
                id: 4,
                name: "PROMO".to_string(),
                rate_limit_seconds: 3600,
                request_limit: 1,
                enabled: false,
            },
        ]
    }

    /// 以指定时间写入一条记录
    ///
    /// 用于预置历史数据（测试、数据导入）。`save` 即以当前时间调用此方法。
    pub fn save_at(
        &self,
        notif_type: &NotificationType,
        user_id: i64,
        sent_at: DateTime<Utc>,
    ) -> NotificationRecord {
        let mut records = self.records.write();
        let record = NotificationRecord {
            id: records.len() as i64 + 1,
            user_id,
            notification_type: notif_type.clone(),
            sent_at,
        };
        records.push(record.clone());
        record
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storer for MemoryStore {
    async fn user_notifications_since(
        &self,
        user_id: i64,
        type_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<NotificationRecord>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .rev()
            .filter(|r| {
                r.user_id == user_id
                    && r.notification_type.name.eq_ignore_ascii_case(type_name)
                    && r.sent_at > since
            })
            .cloned()
            .collect())
    }

    async fn types(&self) -> Result<Vec<NotificationType>> {
        Ok(self.types.iter().filter(|t| t.enabled).cloned().collect())
    }

    async fn save(
        &self,
        notif_type: &NotificationType,
        user_id: i64,
    ) -> Result<NotificationRecord> {
        Ok(self.save_at(notif_type, user_id, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn status_type() -> NotificationType {
        MemoryStore::seed_types().into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_types_returns_enabled_only() {
        let store = MemoryStore::new();

        let types = store.types().await.unwrap();

        assert_eq!(types.len(), 3);
        assert!(types.iter().all(|t| t.enabled));
        assert!(!types.iter().any(|t| t.name == "PROMO"));
    }

    #[tokio::test]
    async fn test_save_assigns_monotonic_one_based_ids() {
        let store = MemoryStore::new();
        let t = status_type();

        let first = store.save(&t, 1).await.unwrap();
        let second = store.save(&t, 2).await.unwrap();
        let third = store.save(&t, 1).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_window_filter_is_strictly_after() {
        let store = MemoryStore::new();
        let t = status_type();
        let boundary = Utc::now() - Duration::seconds(120);

        store.save_at(&t, 1, boundary); // 恰好等于下界，不计入
        store.save_at(&t, 1, boundary + Duration::seconds(1));
        store.save_at(&t, 1, boundary - Duration::seconds(1));

        let records = store
            .user_notifications_since(1, "STATUS", boundary)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sent_at, boundary + Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_window_filter_matches_user_and_type_case_insensitive() {
        let store = MemoryStore::new();
        let types = MemoryStore::seed_types();
        let status = &types[0];
        let news = &types[1];
        let since = Utc::now() - Duration::seconds(3600);

        store.save_at(status, 1, Utc::now());
        store.save_at(status, 2, Utc::now()); // 其他用户
        store.save_at(news, 1, Utc::now()); // 其他类型

        let records = store
            .user_notifications_since(1, "status", since)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, 1);
        assert_eq!(records[0].notification_type.name, "STATUS");
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_history() {
        let store = MemoryStore::new();

        let records = store
            .user_notifications_since(1, "STATUS", Utc::now() - Duration::seconds(120))
            .await
            .unwrap();

        assert!(records.is_empty());
    }
}
