//! Redis connection and key namespacing.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use till_core::config::cache::RedisCacheConfig;
use till_core::error::{AppError, ErrorKind};
use till_core::result::AppResult;

/// A reconnecting Redis connection plus the namespace for this deployment.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisClient {
    /// Open the connection described by `config`.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(url = %redact_userinfo(&config.url), namespace = %config.namespace, "Connecting to Redis");

        let client = Client::open(config.url.as_str())
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Invalid Redis URL", e))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Redis unreachable", e))?;

        Ok(Self {
            conn,
            namespace: config.namespace.clone(),
        })
    }

    /// A handle for issuing commands. Clones share the underlying connection.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` inside this deployment's namespace.
    pub fn namespaced(&self, key: &str) -> String {
        let mut full = String::with_capacity(self.namespace.len() + key.len());
        full.push_str(&self.namespace);
        full.push_str(key);
        full
    }
}

/// Replace the user-info part of a URL (`user:pass@`) for logging.
fn redact_userinfo(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
