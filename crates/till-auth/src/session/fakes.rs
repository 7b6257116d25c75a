//! In-memory stand-ins for the identity provider and role store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use till_core::config::RoleSourceConfig;
use till_core::error::AppError;
use till_core::result::AppResult;
use till_core::traits::{Identity, IdentityProvider, RoleStore};

#[derive(Debug, Clone)]
enum IdentityMode {
    SignedOut,
    User(Uuid),
    Failing,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeIdentity {
    mode: IdentityMode,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl FakeIdentity {
    fn with_mode(mode: IdentityMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn signed_out() -> Self {
        Self::with_mode(IdentityMode::SignedOut)
    }

    pub(crate) fn user(id: Uuid) -> Self {
        Self::with_mode(IdentityMode::User(id))
    }

    pub(crate) fn failing() -> Self {
        Self::with_mode(IdentityMode::Failing)
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn current_user(&self) -> AppResult<Option<Identity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.mode {
            IdentityMode::SignedOut => Ok(None),
            IdentityMode::User(id) => Ok(Some(Identity::new(id))),
            IdentityMode::Failing => Err(AppError::unavailable("auth backend down")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRoleStore {
    primary: Arc<Mutex<HashMap<Uuid, String>>>,
    legacy: Arc<Mutex<HashMap<Uuid, String>>>,
    fail_primary: bool,
    legacy_calls: Arc<AtomicUsize>,
}

impl FakeRoleStore {
    pub(crate) fn with_primary(self, user: Uuid, role: &str) -> Self {
        self.primary.lock().unwrap().insert(user, role.to_string());
        self
    }

    pub(crate) fn with_legacy(self, user: Uuid, role: &str) -> Self {
        self.legacy.lock().unwrap().insert(user, role.to_string());
        self
    }

    pub(crate) fn failing_primary(mut self) -> Self {
        self.fail_primary = true;
        self
    }

    pub(crate) fn legacy_calls(&self) -> usize {
        self.legacy_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for FakeRoleStore {
    async fn find_role(
        &self,
        source: &RoleSourceConfig,
        user_id: Uuid,
    ) -> AppResult<Option<String>> {
        if source.table == "user_roles" {
            if self.fail_primary {
                return Err(AppError::database("connection reset"));
            }
            Ok(self.primary.lock().unwrap().get(&user_id).cloned())
        } else {
            self.legacy_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.legacy.lock().unwrap().get(&user_id).cloned())
        }
    }
}
