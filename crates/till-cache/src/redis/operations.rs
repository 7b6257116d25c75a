//! [`CacheProvider`] over Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use till_core::error::{AppError, ErrorKind};
use till_core::result::AppResult;
use till_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Keys examined per SCAN step.
const SCAN_COUNT: usize = 250;

/// Query cache shared by every client of a deployment.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
    default_ttl: Duration,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient, default_ttl_seconds: u64) -> Self {
        Self {
            client,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

/// Escape the characters SCAN `MATCH` treats as wildcards so a key prefix
/// only ever matches itself.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn cache_err(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Cache, e.to_string(), e)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.connection();
        conn.get(self.client.namespaced(key)).await.map_err(cache_err)
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        // SETEX takes whole seconds; never let a short TTL become "no expiry".
        let seconds = ttl.unwrap_or(self.default_ttl).as_secs().max(1);
        let mut conn = self.client.connection();
        let _: () = conn
            .set_ex(self.client.namespaced(key), value, seconds)
            .await
            .map_err(cache_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.client.connection();
        let removed: u64 = conn
            .del(self.client.namespaced(key))
            .await
            .map_err(cache_err)?;
        Ok(removed > 0)
    }

    async fn contains(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.client.connection();
        conn.exists(self.client.namespaced(key))
            .await
            .map_err(cache_err)
    }

    async fn remove_prefix(&self, prefix: &str) -> AppResult<u64> {
        let pattern = format!("{}*", escape_glob(&self.client.namespaced(prefix)));
        let mut conn = self.client.connection();

        // Unlink each SCAN batch as it arrives instead of collecting the
        // whole keyspace first.
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(cache_err)?;

            if !batch.is_empty() {
                let unlinked: u64 = redis::cmd("UNLINK")
                    .arg(&batch)
                    .query_async(&mut conn)
                    .await
                    .map_err(cache_err)?;
                removed += unlinked;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(prefix, removed, "Removed cached entries by prefix");
        Ok(removed)
    }

    async fn ping(&self) -> AppResult<bool> {
        let mut conn = self.client.connection();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_err)?;
        Ok(reply == "PONG")
    }
}
