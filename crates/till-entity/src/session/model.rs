//! Session and access-state models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_core::config::AccessConfig;

use crate::role::Role;

/// Where a resolved role came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleOrigin {
    /// The primary role table.
    Primary,
    /// The legacy profile table.
    Legacy,
    /// Neither source yielded a role, or a lookup failed.
    Default,
}

/// An authenticated user with a resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Authenticated user id.
    pub user_id: Uuid,
    /// Resolved role.
    pub role: Role,
    /// Which source produced `role`.
    pub origin: RoleOrigin,
    /// When the role was resolved.
    pub resolved_at: DateTime<Utc>,
}

/// The permission bypass used by demo and trial deployments.
///
/// Only [`DemoSession::from_config`] builds one, and only when the
/// configuration turns demo mode on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSession {
    label: String,
}

impl DemoSession {
    /// Build the demo session if `config` enables demo mode.
    pub fn from_config(config: &AccessConfig) -> Option<Self> {
        config.demo_mode.then(|| Self {
            label: config.demo_label.clone(),
        })
    }

    /// Label identifying the demo deployment.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The current session of one running client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    /// Nobody is signed in.
    Anonymous,
    /// A signed-in user.
    User(UserSession),
    /// Demo deployment: every gate renders its content.
    Demo(DemoSession),
}

impl Session {
    /// The resolved role, if a user is signed in.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::User(user) => Some(user.role),
            Self::Anonymous | Self::Demo(_) => None,
        }
    }

    /// The signed-in user id, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::User(user) => Some(user.user_id),
            Self::Anonymous | Self::Demo(_) => None,
        }
    }

    /// Whether this is the demo bypass.
    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }
}

/// Process-wide access state published to every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "session", rename_all = "snake_case")]
pub enum AccessState {
    /// A resolution pass is in flight.
    Resolving,
    /// The session is known.
    Ready(Session),
}

impl AccessState {
    /// Whether a resolution pass is in flight.
    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// The session, once resolved.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Resolving => None,
            Self::Ready(session) => Some(session),
        }
    }
}
