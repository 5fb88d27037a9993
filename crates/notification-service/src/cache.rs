//! 类型目录缓存
//!
//! `Cacher` trait 定义核心依赖的缓存契约：带 TTL 的键值读写。
//! 类型目录整体作为一个 JSON 块存在固定键下，目录小且变更少，
//! 一次往返换整个目录比按类型分键更划算。
//!
//! 提供两个实现：`MemoryCache`（进程内，真实遵守 TTL）和
//! `notify_shared::cache::Cache`（Redis）。

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
#[cfg(test)]
use mockall::automock;
use notify_shared::error::Result;
use serde_json::Value;

/// 类型目录在缓存中的固定键
pub const NOTIFICATION_TYPES_KEY: &str = "notification_types";

/// 缓存契约
///
/// `get` 返回 `Ok(None)` 表示未命中；读错误由调用方决定如何处理
/// （核心将其视同未命中），写错误则向上传播。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cacher: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> Result<()>;
}

/// 进程内缓存
///
/// 惰性过期：读取时检查并清除已过期的条目。
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, (Value, Instant)>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cacher for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                let (value, expires_at) = entry.value();
                if Instant::now() < *expires_at {
                    return Ok(Some(value.clone()));
                }
                true
            }
            None => false,
        };

        // 读锁释放后再清除过期条目
        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> Result<()> {
        self.entries
            .insert(key.to_string(), (value.clone(), Instant::now() + ttl));
        Ok(())
    }
}

#[async_trait]
impl Cacher for notify_shared::cache::Cache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        notify_shared::cache::Cache::get::<Value>(self, key).await
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> Result<()> {
        notify_shared::cache::Cache::set(self, key, value, ttl).await
    }
}
