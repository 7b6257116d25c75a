//! The keyed store behind cached query results.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A string-valued key/value cache with per-entry lifetimes.
///
/// Views cache serialized query results here; the refresh coordinator
/// removes them by key prefix after mutations. Implementations apply their
/// own namespacing.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// The value under `key`, unless absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value`. `None` uses the provider's default lifetime.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;

    /// Remove `key`; returns whether it was present.
    async fn remove(&self, key: &str) -> AppResult<bool>;

    /// Whether `key` holds a live value.
    async fn contains(&self, key: &str) -> AppResult<bool>;

    /// Remove every key starting with `prefix`; returns how many were removed.
    async fn remove_prefix(&self, prefix: &str) -> AppResult<u64>;

    /// Whether the backend answers.
    async fn ping(&self) -> AppResult<bool>;
}
