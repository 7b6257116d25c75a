//! In-process query cache built on moka.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use till_core::config::cache::MemoryCacheConfig;
use till_core::result::AppResult;
use till_core::traits::cache::CacheProvider;

/// A cached body with the lifetime it was stored with.
#[derive(Debug, Clone)]
struct Entry {
    body: Arc<str>,
    ttl: Duration,
}

/// Expires each entry after its own lifetime, restarting on overwrite.
struct EntryLifetime;

impl Expiry<String, Entry> for EntryLifetime {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Query cache local to one client process.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
    /// Lifetime used when the writer gives none.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create an empty cache.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(EntryLifetime)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.body.to_string()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let entry = Entry {
            body: Arc::from(value),
            ttl: ttl.unwrap_or(self.default_ttl),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn contains(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn remove_prefix(&self, prefix: &str) -> AppResult<u64> {
        let matching: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter_map(|(key, _)| key.starts_with(prefix).then_some(key))
            .collect();

        let mut removed = 0;
        for key in matching {
            if self.cache.remove(key.as_str()).await.is_some() {
                removed += 1;
            }
        }

        debug!(prefix, removed, "Removed cached entries by prefix");
        Ok(removed)
    }

    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}
