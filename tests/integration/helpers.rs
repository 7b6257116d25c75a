//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use till_auth::{Claims, JwtDecoder, JwtIdentityProvider, PermissionEvaluator, SessionContext};
use till_cache::{CacheManager, keys};
use till_core::config::{AccessConfig, AuthConfig, CacheConfig, RoleSourceConfig};
use till_core::error::AppError;
use till_core::result::AppResult;
use till_core::traits::{CacheProvider, IdentityProvider, RoleStore};
use till_service::{AccessContext, BroadcastNotifier};

/// Secret shared by the test token issuer and the decoder.
pub const SECRET: &str = "integration-secret";

/// Role tables kept in memory, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct TestRoleStore {
    rows: Arc<Mutex<HashMap<(String, Uuid), String>>>,
    broken: Arc<Mutex<HashSet<String>>>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl TestRoleStore {
    /// Make every lookup take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Put a role row into `table`.
    pub fn insert(&self, table: &str, user: Uuid, role: &str) {
        self.rows
            .lock()
            .unwrap()
            .insert((table.to_string(), user), role.to_string());
    }

    /// Make every lookup in `table` fail.
    pub fn break_table(&self, table: &str) {
        self.broken.lock().unwrap().insert(table.to_string());
    }

    /// Lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for TestRoleStore {
    async fn find_role(
        &self,
        source: &RoleSourceConfig,
        user_id: Uuid,
    ) -> AppResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.broken.lock().unwrap().contains(&source.table) {
            return Err(AppError::database(format!("{} unavailable", source.table)));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(source.table.clone(), user_id))
            .cloned())
    }
}

/// A composed access context over in-memory collaborators.
pub struct TestApp {
    pub context: AccessContext,
    pub notifier: BroadcastNotifier,
    pub store: TestRoleStore,
}

impl TestApp {
    /// A live (non-demo) app.
    pub async fn new() -> Self {
        Self::with_access(AccessConfig::default()).await
    }

    /// An app with custom access settings.
    pub async fn with_access(access: AccessConfig) -> Self {
        Self::with_store(access, TestRoleStore::default()).await
    }

    /// An app over a prepared role store.
    pub async fn with_store(access: AccessConfig, store: TestRoleStore) -> Self {
        let identity = Arc::new(JwtIdentityProvider::new(JwtDecoder::new(&auth_config())));
        let lookup: Arc<dyn IdentityProvider> = identity.clone();

        let session = SessionContext::from_config(
            &access,
            lookup,
            Arc::new(store.clone()),
            PermissionEvaluator::new(),
        )
        .expect("Failed to build session context");

        let cache = Arc::new(
            CacheManager::new(&CacheConfig::default())
                .await
                .expect("Failed to init cache"),
        );
        let notifier = BroadcastNotifier::new(32);

        let context = AccessContext::from_parts(identity, session, cache, Arc::new(notifier.clone()));
        Self {
            context,
            notifier,
            store,
        }
    }

    /// Cache a query result under `group`.
    pub async fn seed_query(&self, group: &str, params: &str) {
        self.context
            .cache()
            .put(&keys::query(group, params), "[]", None)
            .await
            .expect("Failed to seed cache");
    }

    /// Whether a cached query result is still present.
    pub async fn is_cached(&self, group: &str, params: &str) -> bool {
        self.context
            .cache()
            .contains(&keys::query(group, params))
            .await
            .expect("Failed to read cache")
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: SECRET.to_string(),
        ..AuthConfig::default()
    }
}

/// A valid access token for `user`.
pub fn token_for(user: Uuid) -> String {
    sign(user, 600, SECRET)
}

/// An access token with arbitrary lifetime and secret.
pub fn sign(user: Uuid, exp_offset: i64, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user,
        email: None,
        role: Some("authenticated".to_string()),
        aud: Some("authenticated".to_string()),
        iat: now,
        exp: now + exp_offset,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}
