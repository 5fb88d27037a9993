//! 准入引擎
//!
//! 串联校验 → 类型解析 → 限流判定 → 投递 → 落库的线性流程。
//! 限流判定必须发生在投递之前，发送记录必须在投递成功之后写入，
//! 因此投递失败不会占用窗口配额；落库失败时消息已送达用户，
//! 按「至少一次投递、尽力记账」处理，不做补偿重试。
//!
//! 已知限制：「判定」与「落库」之间没有原子性，同一用户的两个并发请求
//! 可能都在对方记录可见前通过判定。单实例尽力限流接受此行为。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use notify_shared::config::CacheConfig;
use notify_shared::error::{NotifyError, Result};
use tracing::{info, instrument, warn};

use crate::cache::{Cacher, NOTIFICATION_TYPES_KEY};
use crate::model::{NotificationRecord, NotificationType, SendRequest, find_type_by_name};
use crate::sender::Sender;
use crate::store::Storer;

/// 通知准入服务
///
/// 所有协作方通过构造函数注入，服务自身不持有可变状态，
/// 同一实例可被任意多个并发请求共享。
pub struct NotificationService {
    gateway: Arc<dyn Sender>,
    repository: Arc<dyn Storer>,
    cache: Arc<dyn Cacher>,
    ttl: Duration,
}

impl NotificationService {
    pub fn new(
        gateway: Arc<dyn Sender>,
        repository: Arc<dyn Storer>,
        cache: Arc<dyn Cacher>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            gateway,
            repository,
            cache,
            ttl: Duration::from_secs(config.type_ttl_seconds),
        }
    }

    /// 处理一次通知发送请求
    ///
    /// 返回 `Ok(record)` 表示已投递并记录；`RateLimitExceeded` 表示
    /// 被限流拒绝，属于预期结果；其余错误为本次请求的致命失败。
    #[instrument(
        skip_all,
        fields(user_id = req.user_id, notification_type = %req.notification_type)
    )]
    pub async fn send(&self, req: &SendRequest) -> Result<NotificationRecord> {
        req.validate()?;

        let notif_type = self.resolve_type(&req.notification_type).await?;

        self.check_rate_limit(&notif_type, req.user_id).await?;

        self.gateway.send(req.user_id, &req.message).await?;

        let record = self.repository.save(&notif_type, req.user_id).await?;
        info!(record_id = record.id, "notification admitted");
        Ok(record)
    }

    /// 解析启用的通知类型（cache-aside）
    ///
    /// 缓存命中即信任其内容：命中集合里没有该名称时直接判定不存在，
    /// 不再回查存储。未命中时回源、写回缓存后再查找。
    async fn resolve_type(&self, name: &str) -> Result<NotificationType> {
        let types = match self.cached_types().await {
            Some(types) => types,
            None => self.refresh_types().await?,
        };

        find_type_by_name(&types, name)
            .cloned()
            .ok_or_else(|| NotifyError::TypeNotFound {
                name: name.to_string(),
            })
    }

    /// 读取缓存的类型目录
    ///
    /// 读错误、未命中、缓存内容无法解析一律按未命中处理，绝不致命。
    async fn cached_types(&self) -> Option<Vec<NotificationType>> {
        match self.cache.get(NOTIFICATION_TYPES_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(types) => Some(types),
                Err(e) => {
                    warn!(error = %e, "类型缓存内容无法解析，按未命中处理");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "类型缓存读取失败，回退到存储");
                None
            }
        }
    }

    /// 回源读取类型目录并写回缓存
    ///
    /// 存储错误与缓存写入错误都原样传播。
    async fn refresh_types(&self) -> Result<Vec<NotificationType>> {
        let types = self.repository.types().await?;

        let value = serde_json::to_value(&types)
            .map_err(|e| NotifyError::Internal(format!("类型目录序列化失败: {}", e)))?;
        self.cache
            .set(NOTIFICATION_TYPES_KEY, &value, self.ttl)
            .await?;

        Ok(types)
    }

    /// 滚动窗口限流判定
    ///
    /// 窗口下界为 `now - rate_limit_seconds`，历史查询错误原样传播，
    /// 绝不在查询出错时默认放行或默认拒绝。
    async fn check_rate_limit(&self, notif_type: &NotificationType, user_id: i64) -> Result<()> {
        let window_start = Utc::now() - chrono::Duration::seconds(notif_type.rate_limit_seconds);

        let recent = self
            .repository
            .user_notifications_since(user_id, &notif_type.name, window_start)
            .await?;

        if !recent.is_empty() && recent.len() >= notif_type.request_limit as usize {
            warn!(
                user_id,
                notification_type = %notif_type.name,
                recent = recent.len(),
                request_limit = notif_type.request_limit,
                "notification rejected by rate limit"
            );
            return Err(NotifyError::RateLimitExceeded {
                type_name: notif_type.name.clone(),
                user_id,
            });
        }

        Ok(())
    }
}
