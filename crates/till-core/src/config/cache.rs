//! Query cache configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which cache backend holds query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process cache, one per client.
    #[default]
    Memory,
    /// Shared Redis instance.
    Redis,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Redis => f.write_str("redis"),
        }
    }
}

/// The `[cache]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub provider: CacheBackend,
    /// Lifetime of a cached query result when the writer gives none.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    #[serde(default)]
    pub memory: MemoryCacheConfig,
    #[serde(default)]
    pub redis: RedisCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: CacheBackend::default(),
            default_ttl_seconds: default_ttl(),
            memory: MemoryCacheConfig::default(),
            redis: RedisCacheConfig::default(),
        }
    }
}

/// The `[cache.memory]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Entry limit before the least valuable entries are evicted.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// The `[cache.redis]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Namespace prepended to every key, so several deployments can share
    /// one Redis.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            namespace: default_namespace(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_namespace() -> String {
    "till:".to_string()
}
