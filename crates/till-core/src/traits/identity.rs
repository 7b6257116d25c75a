//! Identity provider trait for the authenticated-user lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// The authenticated identity as reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id (the token subject).
    pub id: Uuid,
    /// Email, when the backend includes it.
    pub email: Option<String>,
}

impl Identity {
    /// Identity with only an id.
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }
}

/// Source of the currently authenticated user.
///
/// Callers treat an `Err` exactly like `Ok(None)`: identity lookups fail
/// closed.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> AppResult<Option<Identity>>;
}
