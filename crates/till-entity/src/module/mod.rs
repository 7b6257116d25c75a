//! Logical data modules used as cache invalidation units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A logical grouping of cached data touched by mutations.
///
/// Unrecognized names parse to [`ModuleName::Unknown`] instead of failing;
/// invalidating an unknown module does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
    Products,
    Inventory,
    Sales,
    Purchases,
    Customers,
    Suppliers,
    Accounts,
    Expenses,
    Production,
    Worker,
    Users,
    Settings,
    Reports,
    /// A name with no entry in the module table.
    #[serde(untagged)]
    Unknown(String),
}

impl ModuleName {
    /// Every known module.
    pub const KNOWN: [ModuleName; 13] = [
        Self::Products,
        Self::Inventory,
        Self::Sales,
        Self::Purchases,
        Self::Customers,
        Self::Suppliers,
        Self::Accounts,
        Self::Expenses,
        Self::Production,
        Self::Worker,
        Self::Users,
        Self::Settings,
        Self::Reports,
    ];

    /// The module name as used by callers.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Products => "products",
            Self::Inventory => "inventory",
            Self::Sales => "sales",
            Self::Purchases => "purchases",
            Self::Customers => "customers",
            Self::Suppliers => "suppliers",
            Self::Accounts => "accounts",
            Self::Expenses => "expenses",
            Self::Production => "production",
            Self::Worker => "worker",
            Self::Users => "users",
            Self::Settings => "settings",
            Self::Reports => "reports",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(Self::KNOWN
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .unwrap_or(Self::Unknown(s.to_string())))
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(module) => module,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_parse() {
        assert_eq!(ModuleName::from("accounts"), ModuleName::Accounts);
        assert_eq!(ModuleName::from(" Sales "), ModuleName::Sales);
    }

    #[test]
    fn test_unknown_names_are_kept() {
        assert_eq!(ModuleName::from("zzz"), ModuleName::Unknown("zzz".to_string()));
        assert_eq!(ModuleName::from("zzz").as_str(), "zzz");
    }
}
