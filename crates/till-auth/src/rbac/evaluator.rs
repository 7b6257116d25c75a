//! Permission evaluation over the shared table.

use std::sync::Arc;

use till_entity::role::{Permission, PermissionSet, Role};

use super::table::PermissionTable;

/// Answers "does this role have permission X". Pure lookups, no side effects.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    /// The policy table.
    table: Arc<PermissionTable>,
}

impl PermissionEvaluator {
    /// Creates an evaluator over the built-in table.
    pub fn new() -> Self {
        Self::with_table(PermissionTable::new())
    }

    /// Creates an evaluator over a custom table.
    pub fn with_table(table: PermissionTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Checks whether the role has the permission.
    pub fn has(&self, role: &Role, permission: Permission) -> bool {
        self.table.has_permission(role, permission)
    }

    /// String form used by views: unknown role or unknown permission → `false`.
    pub fn has_named(&self, role: &str, permission: &str) -> bool {
        match (role.parse::<Role>(), permission.parse::<Permission>()) {
            (Ok(role), Ok(permission)) => self.has(&role, permission),
            _ => false,
        }
    }

    /// All permissions of a role; `None` (no resolved role) yields the empty set.
    pub fn permissions_for(&self, role: Option<&Role>) -> PermissionSet {
        role.map(|r| self.table.permissions_for_role(r))
            .unwrap_or_default()
    }

    /// Returns whether the role is an admin.
    pub fn is_admin(&self, role: &Role) -> bool {
        role.is_admin()
    }

    /// Returns whether the role is a manager or above.
    pub fn is_manager_or_above(&self, role: &Role) -> bool {
        role.is_manager_or_above()
    }

    /// Returns whether the role is a cashier or above.
    pub fn is_cashier_or_above(&self, role: &Role) -> bool {
        role.is_cashier_or_above()
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
