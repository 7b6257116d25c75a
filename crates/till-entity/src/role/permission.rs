//! Named permissions and the set derived from a role.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A UI capability, named with dotted `area.action` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    // Dashboard
    #[serde(rename = "dashboard.view")]
    DashboardView,

    // Sales
    #[serde(rename = "sales.view")]
    SalesView,
    #[serde(rename = "sales.create")]
    SalesCreate,
    #[serde(rename = "sales.refund")]
    SalesRefund,

    // Purchases
    #[serde(rename = "purchases.view")]
    PurchasesView,
    #[serde(rename = "purchases.create")]
    PurchasesCreate,

    // Inventory and catalogue
    #[serde(rename = "inventory.view")]
    InventoryView,
    #[serde(rename = "inventory.adjust")]
    InventoryAdjust,
    #[serde(rename = "products.view")]
    ProductsView,
    #[serde(rename = "products.manage")]
    ProductsManage,

    // Parties
    #[serde(rename = "customers.view")]
    CustomersView,
    #[serde(rename = "customers.manage")]
    CustomersManage,
    #[serde(rename = "suppliers.view")]
    SuppliersView,
    #[serde(rename = "suppliers.manage")]
    SuppliersManage,

    // Accounting
    #[serde(rename = "accounting.view")]
    AccountingView,
    #[serde(rename = "accounting.manage")]
    AccountingManage,
    #[serde(rename = "expenses.view")]
    ExpensesView,
    #[serde(rename = "expenses.create")]
    ExpensesCreate,

    // Production
    #[serde(rename = "production.view")]
    ProductionView,
    #[serde(rename = "production.manage")]
    ProductionManage,
    #[serde(rename = "worker.steps.view")]
    WorkerStepsView,
    #[serde(rename = "worker.steps.update")]
    WorkerStepsUpdate,

    // Reporting and administration
    #[serde(rename = "reports.view")]
    ReportsView,
    #[serde(rename = "reports.export")]
    ReportsExport,
    #[serde(rename = "users.manage")]
    UsersManage,
    #[serde(rename = "settings.manage")]
    SettingsManage,
    #[serde(rename = "audit.view")]
    AuditView,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 27] = [
        Self::DashboardView,
        Self::SalesView,
        Self::SalesCreate,
        Self::SalesRefund,
        Self::PurchasesView,
        Self::PurchasesCreate,
        Self::InventoryView,
        Self::InventoryAdjust,
        Self::ProductsView,
        Self::ProductsManage,
        Self::CustomersView,
        Self::CustomersManage,
        Self::SuppliersView,
        Self::SuppliersManage,
        Self::AccountingView,
        Self::AccountingManage,
        Self::ExpensesView,
        Self::ExpensesCreate,
        Self::ProductionView,
        Self::ProductionManage,
        Self::WorkerStepsView,
        Self::WorkerStepsUpdate,
        Self::ReportsView,
        Self::ReportsExport,
        Self::UsersManage,
        Self::SettingsManage,
        Self::AuditView,
    ];

    /// The dotted name used by views.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard.view",
            Self::SalesView => "sales.view",
            Self::SalesCreate => "sales.create",
            Self::SalesRefund => "sales.refund",
            Self::PurchasesView => "purchases.view",
            Self::PurchasesCreate => "purchases.create",
            Self::InventoryView => "inventory.view",
            Self::InventoryAdjust => "inventory.adjust",
            Self::ProductsView => "products.view",
            Self::ProductsManage => "products.manage",
            Self::CustomersView => "customers.view",
            Self::CustomersManage => "customers.manage",
            Self::SuppliersView => "suppliers.view",
            Self::SuppliersManage => "suppliers.manage",
            Self::AccountingView => "accounting.view",
            Self::AccountingManage => "accounting.manage",
            Self::ExpensesView => "expenses.view",
            Self::ExpensesCreate => "expenses.create",
            Self::ProductionView => "production.view",
            Self::ProductionManage => "production.manage",
            Self::WorkerStepsView => "worker.steps.view",
            Self::WorkerStepsUpdate => "worker.steps.update",
            Self::ReportsView => "reports.view",
            Self::ReportsExport => "reports.export",
            Self::UsersManage => "users.manage",
            Self::SettingsManage => "settings.manage",
            Self::AuditView => "audit.view",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = till_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| till_core::AppError::validation(format!("Unknown permission: '{s}'")))
    }
}

/// The permissions granted to one role.
///
/// Built only from the permission table; there is no way to add to or
/// remove from a set after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionSet {
    granted: BTreeSet<Permission>,
}

impl PermissionSet {
    /// The empty set (unauthenticated, unknown role).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every known permission.
    pub fn all() -> Self {
        Self::from_iter(Permission::ALL)
    }

    /// Whether `permission` is granted.
    pub fn contains(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    /// Whether the permission with this dotted name is granted.
    ///
    /// Unknown names are never granted.
    pub fn contains_named(&self, name: &str) -> bool {
        name.parse::<Permission>()
            .map(|p| self.contains(p))
            .unwrap_or(false)
    }

    /// Iterate the granted permissions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.granted.iter().copied()
    }

    /// Number of granted permissions.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Name → granted flag for every known permission.
    pub fn to_map(&self) -> BTreeMap<&'static str, bool> {
        Permission::ALL
            .into_iter()
            .map(|p| (p.as_str(), self.contains(p)))
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}
