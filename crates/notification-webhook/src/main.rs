//! 通知 webhook 服务入口
//!
//! 组装协作方（存储、缓存、发送渠道）并注入准入服务，然后启动 HTTP 服务。
//! 存储与发送渠道当前为进程内模拟实现，缓存后端可通过配置切换为 Redis。

use std::sync::Arc;

use notification_service::NotificationService;
use notification_service::cache::{Cacher, MemoryCache};
use notification_service::sender::LogSender;
use notification_service::store::MemoryStore;
use notification_webhook::routes;
use notification_webhook::state::AppState;
use notify_shared::config::{AppConfig, CacheBackend};
use notify_shared::observability;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("notification-webhook")?;
    observability::init(&config.observability)?;

    info!(
        environment = %config.environment,
        cache_backend = ?config.cache.backend,
        "Starting notification-webhook..."
    );

    let cache: Arc<dyn Cacher> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Redis => Arc::new(notify_shared::cache::Cache::new(&config.redis)?),
    };

    let service = Arc::new(NotificationService::new(
        Arc::new(LogSender),
        Arc::new(MemoryStore::new()),
        cache,
        &config.cache,
    ));

    let app = routes::router(AppState::new(service));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "notification webhook listening");

    axum::serve(listener, app).await?;

    Ok(())
}
