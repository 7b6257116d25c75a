//! Read-only view of the access state at one instant.

use serde::Serialize;

use till_entity::role::{Permission, PermissionSet, Role};
use till_entity::session::{AccessState, Session};

use crate::rbac::PermissionEvaluator;

/// What a view sees when it renders: the role, its permissions, and whether
/// resolution is still in flight.
///
/// In a demo session every query answers `true` and [`Self::is_bypass`]
/// reports it, so bypass answers never pass for real grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSnapshot {
    state: AccessState,
    permissions: PermissionSet,
}

impl AccessSnapshot {
    /// Derive the snapshot of `state`.
    pub fn new(state: AccessState, evaluator: &PermissionEvaluator) -> Self {
        let permissions = match state.session() {
            Some(Session::Demo(_)) => PermissionSet::all(),
            Some(session) => evaluator.permissions_for(session.role().as_ref()),
            None => PermissionSet::empty(),
        };
        Self { state, permissions }
    }

    /// The underlying state.
    pub fn state(&self) -> &AccessState {
        &self.state
    }

    /// The session, once resolved.
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// The resolved role of a signed-in user.
    pub fn role(&self) -> Option<Role> {
        self.session().and_then(Session::role)
    }

    /// The permission set in effect.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Whether resolution is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_resolving()
    }

    /// Whether the demo bypass is active.
    pub fn is_bypass(&self) -> bool {
        self.session().is_some_and(Session::is_demo)
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session(), Some(Session::User(_)))
    }

    /// Whether the named permission is in effect; unknown names are `false`.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains_named(name)
    }

    /// Whether `permission` is in effect.
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether the user is an admin.
    pub fn is_admin(&self) -> bool {
        self.meets(Role::Admin)
    }

    /// Whether the user is a manager or above.
    pub fn is_manager_or_above(&self) -> bool {
        self.meets(Role::Manager)
    }

    /// Whether the user is a cashier or above.
    pub fn is_cashier_or_above(&self) -> bool {
        self.meets(Role::Cashier)
    }

    /// Whether the session meets a minimum role.
    pub fn meets(&self, minimum: Role) -> bool {
        self.is_bypass() || self.role().is_some_and(|r| r.has_at_least(&minimum))
    }
}
