//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
        }
    }
}

/// 缓存后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// 进程内缓存，适用于单实例部署和本地开发
    Memory,
    /// Redis 缓存
    Redis,
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// 通知类型目录在缓存中的有效期（秒）
    pub type_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            type_ttl_seconds: 300,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. 环境变量（NOTIFY_ 前缀，如 NOTIFY_REDIS_URL -> redis.url）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("NOTIFY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                Environment::with_prefix("NOTIFY")
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.type_ttl_seconds, 300);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = AppConfig::load("notification-webhook").expect("load config");
        assert_eq!(config.service_name, "notification-webhook");
        assert_eq!(config.cache.type_ttl_seconds, 300);
    }

    #[test]
    fn test_cache_backend_deserialize() {
        let backend: CacheBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, CacheBackend::Redis);
        let backend: CacheBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, CacheBackend::Memory);
    }
}
