//! Identity provider backed by the current access token.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use till_core::result::AppResult;
use till_core::traits::{Identity, IdentityProvider};

use crate::jwt::JwtDecoder;

/// Holds the access token of the signed-in user and validates it on each
/// lookup.
#[derive(Debug)]
pub struct JwtIdentityProvider {
    decoder: JwtDecoder,
    token: RwLock<Option<String>>,
}

impl JwtIdentityProvider {
    /// Creates a provider with nobody signed in.
    pub fn new(decoder: JwtDecoder) -> Self {
        Self {
            decoder,
            token: RwLock::new(None),
        }
    }

    /// Store the token from a login or a restored session.
    pub async fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        debug!("Access token stored");
    }

    /// Forget the token (logout).
    pub async fn sign_out(&self) {
        *self.token.write().await = None;
        debug!("Access token cleared");
    }

    /// Whether a token is currently held (valid or not).
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn current_user(&self) -> AppResult<Option<Identity>> {
        let guard = self.token.read().await;
        let Some(token) = guard.as_deref() else {
            return Ok(None);
        };
        let claims = self.decoder.decode_access_token(token)?;
        Ok(Some(Identity {
            id: claims.sub,
            email: claims.email,
        }))
    }
}
