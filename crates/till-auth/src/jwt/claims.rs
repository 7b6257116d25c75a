//! Access-token payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims of an access token issued by the auth backend.
///
/// `role` is the database role the token runs as (normally
/// `"authenticated"`), never the application role. Application roles come
/// from the role tables only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user id.
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Issued at, seconds since the epoch.
    #[serde(default)]
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}
