//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles assigned by the backend. The client only reads them.
///
/// Privilege levels drive the threshold gates:
/// Admin > Manager > {Accountant, Cashier, Sales, Auditor} > ProductionWorker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owner or system administrator.
    Admin,
    /// Branch or store manager.
    Manager,
    /// Bookkeeping and expenses.
    Accountant,
    /// Point-of-sale operator.
    Cashier,
    /// Field or counter sales.
    Sales,
    /// Shop-floor worker on production orders.
    ProductionWorker,
    /// Read-only reviewer.
    Auditor,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 7] = [
        Self::Admin,
        Self::Manager,
        Self::Accountant,
        Self::Cashier,
        Self::Sales,
        Self::ProductionWorker,
        Self::Auditor,
    ];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Manager => 2,
            Self::Accountant | Self::Cashier | Self::Sales | Self::Auditor => 1,
            Self::ProductionWorker => 0,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a manager or higher.
    pub fn is_manager_or_above(&self) -> bool {
        self.has_at_least(&Self::Manager)
    }

    /// Check if this role is a cashier or higher.
    pub fn is_cashier_or_above(&self) -> bool {
        self.has_at_least(&Self::Cashier)
    }

    /// Return the role as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::Cashier => "cashier",
            Self::Sales => "sales",
            Self::ProductionWorker => "production_worker",
            Self::Auditor => "auditor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = till_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| {
                till_core::AppError::validation(format!(
                    "Invalid role: '{s}'. Expected one of: admin, manager, accountant, \
                     cashier, sales, production_worker, auditor"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(Role::Admin.has_at_least(&Role::Manager));
        assert!(Role::Manager.has_at_least(&Role::Cashier));
        assert!(Role::Sales.has_at_least(&Role::Cashier));
        assert!(!Role::ProductionWorker.has_at_least(&Role::Cashier));
        assert!(!Role::Cashier.is_manager_or_above());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" CASHIER ".parse::<Role>().unwrap(), Role::Cashier);
        assert_eq!(
            "production-worker".parse::<Role>().unwrap(),
            Role::ProductionWorker
        );
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_matches_backend_text() {
        let json = serde_json::to_string(&Role::ProductionWorker).unwrap();
        assert_eq!(json, "\"production_worker\"");
    }
}
