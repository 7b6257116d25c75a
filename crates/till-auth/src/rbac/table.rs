//! Role-to-permission mapping definitions.
//!
//! This is the only copy of the table; web and mobile surfaces both read it.

use std::collections::HashMap;

use till_entity::role::{Permission, PermissionSet, Role};

use Permission::*;

const MANAGER: &[Permission] = &[
    DashboardView,
    SalesView,
    SalesCreate,
    SalesRefund,
    PurchasesView,
    PurchasesCreate,
    InventoryView,
    InventoryAdjust,
    ProductsView,
    ProductsManage,
    CustomersView,
    CustomersManage,
    SuppliersView,
    SuppliersManage,
    AccountingView,
    AccountingManage,
    ExpensesView,
    ExpensesCreate,
    ProductionView,
    ProductionManage,
    WorkerStepsView,
    WorkerStepsUpdate,
    ReportsView,
    ReportsExport,
    AuditView,
];

const ACCOUNTANT: &[Permission] = &[
    DashboardView,
    SalesView,
    PurchasesView,
    CustomersView,
    SuppliersView,
    AccountingView,
    AccountingManage,
    ExpensesView,
    ExpensesCreate,
    ReportsView,
    ReportsExport,
];

const CASHIER: &[Permission] = &[
    DashboardView,
    SalesView,
    SalesCreate,
    ProductsView,
    InventoryView,
    CustomersView,
    CustomersManage,
];

const SALES: &[Permission] = &[
    DashboardView,
    SalesView,
    SalesCreate,
    ProductsView,
    InventoryView,
    CustomersView,
    CustomersManage,
    ReportsView,
];

const PRODUCTION_WORKER: &[Permission] = &[ProductionView, WorkerStepsView, WorkerStepsUpdate];

const AUDITOR: &[Permission] = &[
    DashboardView,
    SalesView,
    PurchasesView,
    InventoryView,
    ProductsView,
    CustomersView,
    SuppliersView,
    AccountingView,
    ExpensesView,
    ProductionView,
    ReportsView,
    ReportsExport,
    AuditView,
];

/// Static grants for one role.
fn grants(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &Permission::ALL,
        Role::Manager => MANAGER,
        Role::Accountant => ACCOUNTANT,
        Role::Cashier => CASHIER,
        Role::Sales => SALES,
        Role::ProductionWorker => PRODUCTION_WORKER,
        Role::Auditor => AUDITOR,
    }
}

/// The mapping from each role to its set of granted permissions.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    /// Role → set of permissions.
    policies: HashMap<Role, PermissionSet>,
}

impl PermissionTable {
    /// Creates the built-in table.
    pub fn new() -> Self {
        let policies = Role::ALL
            .into_iter()
            .map(|role| (role, grants(role).iter().copied().collect()))
            .collect();
        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> PermissionSet {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &Role, permission: Permission) -> bool {
        self.policies
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::new()
    }
}
