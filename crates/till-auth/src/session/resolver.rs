//! Role resolution: identity → primary role table → legacy table → default.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use till_core::config::{AccessConfig, RoleSourceConfig};
use till_core::error::AppError;
use till_core::traits::{IdentityProvider, RoleStore};
use till_entity::role::Role;
use till_entity::session::{RoleOrigin, Session, UserSession};

/// Outcome of one role-source lookup.
enum Lookup {
    Found(Role),
    Miss,
    Failed,
}

/// Resolves the signed-in user's role. Never fails open: every error path
/// ends in the restrictive default role or the anonymous session.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RoleStore>,
    primary: RoleSourceConfig,
    legacy: RoleSourceConfig,
    default_role: Role,
}

impl RoleResolver {
    /// Creates a resolver from the access configuration.
    ///
    /// Fails if `default_role` does not name a known role.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RoleStore>,
        config: &AccessConfig,
    ) -> Result<Self, AppError> {
        let default_role = config.default_role.parse::<Role>().map_err(|e| {
            AppError::configuration(format!("access.default_role: {}", e.message))
        })?;

        Ok(Self {
            identity,
            store,
            primary: config.primary_source.clone(),
            legacy: config.legacy_source.clone(),
            default_role,
        })
    }

    /// The role used when no source yields one.
    pub fn default_role(&self) -> Role {
        self.default_role
    }

    /// Run one resolution pass.
    pub async fn resolve(&self) -> Session {
        let identity = match self.identity.current_user().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!("No authenticated user");
                return Session::Anonymous;
            }
            Err(e) => {
                debug!(error = %e, "Identity lookup failed; treating as signed out");
                return Session::Anonymous;
            }
        };

        let user_id = identity.id;
        let (role, origin) = match self.lookup(&self.primary, user_id).await {
            Lookup::Found(role) => (role, RoleOrigin::Primary),
            Lookup::Failed => (self.default_role, RoleOrigin::Default),
            Lookup::Miss => match self.lookup(&self.legacy, user_id).await {
                Lookup::Found(role) => (role, RoleOrigin::Legacy),
                Lookup::Miss | Lookup::Failed => (self.default_role, RoleOrigin::Default),
            },
        };

        info!(%user_id, %role, ?origin, "Role resolved");
        Session::User(UserSession {
            user_id,
            role,
            origin,
            resolved_at: Utc::now(),
        })
    }

    async fn lookup(&self, source: &RoleSourceConfig, user_id: Uuid) -> Lookup {
        match self.store.find_role(source, user_id).await {
            Ok(Some(raw)) => match raw.parse::<Role>() {
                Ok(role) => Lookup::Found(role),
                Err(_) => {
                    warn!(table = %source.table, %user_id, value = %raw, "Unrecognized role value");
                    Lookup::Miss
                }
            },
            Ok(None) => Lookup::Miss,
            Err(e) => {
                warn!(table = %source.table, %user_id, error = %e, "Role lookup failed");
                Lookup::Failed
            }
        }
    }
}
