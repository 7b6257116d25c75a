//! The composition root of the access layer.

use std::sync::Arc;

use tracing::info;

use till_auth::{JwtDecoder, JwtIdentityProvider, PermissionEvaluator, RoleResolver, SessionContext};
use till_cache::CacheManager;
use till_core::config::AppConfig;
use till_core::error::AppError;
use till_core::traits::{CacheProvider, IdentityProvider, Notifier, RoleStore};
use till_database::{DatabasePool, PgRoleStore};
use till_entity::session::{DemoSession, Session};

use crate::refresh::RefreshCoordinator;

/// Everything a client surface needs, built once at startup and shared by
/// `Arc`.
#[derive(Debug)]
pub struct AccessContext {
    /// Token slot behind the identity lookups.
    identity: Arc<JwtIdentityProvider>,
    /// The process-wide session.
    session: Arc<SessionContext>,
    /// Query cache.
    cache: Arc<CacheManager>,
    /// Post-mutation refresh.
    coordinator: Arc<RefreshCoordinator>,
    /// Absent in demo mode.
    database: Option<DatabasePool>,
}

impl AccessContext {
    /// Build the context from configuration.
    ///
    /// In demo mode no database pool is created.
    pub async fn bootstrap(
        config: &AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let identity = Arc::new(JwtIdentityProvider::new(JwtDecoder::new(&config.auth)));
        let evaluator = PermissionEvaluator::new();

        let (session, database) = match DemoSession::from_config(&config.access) {
            Some(demo) => (SessionContext::demo(demo, evaluator), None),
            None => {
                let pool = DatabasePool::connect(&config.database).await?;
                let store: Arc<dyn RoleStore> = Arc::new(PgRoleStore::new(pool.pool().clone()));
                let lookup: Arc<dyn IdentityProvider> = identity.clone();
                let resolver = RoleResolver::new(lookup, store, &config.access)?;
                (SessionContext::live(resolver, evaluator), Some(pool))
            }
        };

        let cache = Arc::new(CacheManager::new(&config.cache).await?);

        let mut context = Self::from_parts(identity, session, cache, notifier);
        context.database = database;

        info!(
            demo = context.session.is_demo(),
            cache = %config.cache.provider,
            "Access context ready"
        );
        Ok(context)
    }

    /// Assemble a context from prebuilt parts. No database pool is held.
    pub fn from_parts(
        identity: Arc<JwtIdentityProvider>,
        session: SessionContext,
        cache: Arc<CacheManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let coordinator = Arc::new(RefreshCoordinator::new(Arc::clone(&cache), notifier));
        Self {
            identity,
            session: Arc::new(session),
            cache,
            coordinator,
            database: None,
        }
    }

    /// The session context.
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// The refresh coordinator.
    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// The query cache.
    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    /// Login or token restoration: store the token, then re-resolve the role.
    ///
    /// A lookup still running for the previous token is discarded.
    pub async fn sign_in(&self, token: impl Into<String>) -> Session {
        self.identity.sign_in(token).await;
        self.session.restart().await
    }

    /// Logout: forget the token and publish the anonymous session.
    pub async fn sign_out(&self) {
        self.identity.sign_out().await;
        self.session.clear().await;
    }

    /// Check the database (when present) and the cache.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let database = match &self.database {
            Some(pool) => pool.health_check().await?,
            None => true,
        };
        let cache = self.cache.ping().await?;
        Ok(database && cache)
    }

    /// Close the database pool.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.database {
            pool.close().await;
        }
    }
}
