//! The configured query cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use till_core::config::cache::{CacheBackend, CacheConfig};
#[cfg(not(all(feature = "memory", feature = "redis-backend")))]
use till_core::error::AppError;
use till_core::result::AppResult;
use till_core::traits::cache::CacheProvider;

use crate::keys;

/// The query cache the rest of the application talks to. Wraps whichever
/// backend the configuration selects.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Open the backend named by `config.provider`.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        info!(backend = %config.provider, default_ttl_seconds = config.default_ttl_seconds, "Opening query cache");
        let inner = match config.provider {
            CacheBackend::Memory => memory_backend(config)?,
            CacheBackend::Redis => redis_backend(config).await?,
        };
        Ok(Self { inner })
    }

    /// Wrap an existing provider.
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }

    /// Drop every cached query of `group`: the group's root key and every
    /// parameterized key under it. Returns the number of entries removed.
    ///
    /// Nothing is refetched here; the next reader repopulates the cache.
    pub async fn invalidate_group(&self, group: &str) -> AppResult<u64> {
        let root = self.inner.remove(&keys::query_root(group)).await?;
        let nested = self
            .inner
            .remove_prefix(&keys::query_group_prefix(group))
            .await?;
        let removed = nested + u64::from(root);
        debug!(group, removed, "Invalidated query group");
        Ok(removed)
    }
}

#[cfg(feature = "memory")]
fn memory_backend(config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    let provider = crate::memory::MemoryCacheProvider::new(&config.memory, config.default_ttl_seconds);
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "memory"))]
fn memory_backend(_config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    Err(AppError::configuration(
        "cache.provider = \"memory\" requires the `memory` feature of till-cache",
    ))
}

#[cfg(feature = "redis-backend")]
async fn redis_backend(config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    let client = crate::redis::RedisClient::connect(&config.redis).await?;
    let provider = crate::redis::RedisCacheProvider::new(client, config.default_ttl_seconds);
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "redis-backend"))]
async fn redis_backend(_config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    Err(AppError::configuration(
        "cache.provider = \"redis\" requires the `redis-backend` feature of till-cache",
    ))
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.inner.put(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        self.inner.remove(key).await
    }

    async fn contains(&self, key: &str) -> AppResult<bool> {
        self.inner.contains(key).await
    }

    async fn remove_prefix(&self, prefix: &str) -> AppResult<u64> {
        self.inner.remove_prefix(prefix).await
    }

    async fn ping(&self) -> AppResult<bool> {
        self.inner.ping().await
    }
}
