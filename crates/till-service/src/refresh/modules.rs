//! Which cached query groups each module's mutations affect.

use till_entity::module::ModuleName;

/// Cache groups touched by a mutation in `module`.
///
/// Unknown modules map to no groups.
pub fn groups_for(module: &ModuleName) -> &'static [&'static str] {
    match module {
        ModuleName::Products => &["products", "inventory"],
        ModuleName::Inventory => &["inventory", "stock_movements", "products"],
        ModuleName::Sales => &["sales", "invoices", "dashboard"],
        ModuleName::Purchases => &["purchases", "purchase_invoices", "dashboard"],
        ModuleName::Customers => &["customers"],
        ModuleName::Suppliers => &["suppliers"],
        ModuleName::Accounts => &["accounts", "transactions"],
        ModuleName::Expenses => &["expenses", "transactions", "dashboard"],
        ModuleName::Production => &["production_orders", "production_steps"],
        ModuleName::Worker => &["production_steps", "worker_tasks"],
        ModuleName::Users => &["users", "profiles"],
        ModuleName::Settings => &["settings"],
        ModuleName::Reports => &["reports", "dashboard"],
        ModuleName::Unknown(_) => &[],
    }
}

/// The full module table, in declaration order.
pub fn module_table() -> Vec<(ModuleName, &'static [&'static str])> {
    ModuleName::KNOWN
        .into_iter()
        .map(|module| {
            let groups = groups_for(&module);
            (module, groups)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_covers_transactions() {
        assert_eq!(
            groups_for(&ModuleName::Accounts),
            &["accounts", "transactions"]
        );
    }

    #[test]
    fn test_every_known_module_has_groups() {
        for (module, groups) in module_table() {
            assert!(!groups.is_empty(), "{module} has no groups");
        }
    }

    #[test]
    fn test_unknown_module_has_none() {
        assert!(groups_for(&ModuleName::from("zzz")).is_empty());
    }
}
