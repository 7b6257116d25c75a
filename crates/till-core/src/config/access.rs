//! Role resolution and visibility gating configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Render every gated control regardless of role (demo/trial deployments).
    #[serde(default)]
    pub demo_mode: bool,
    /// Label recorded on the demo session and in every bypass log line.
    #[serde(default = "default_demo_label")]
    pub demo_label: String,
    /// Role assigned when no source yields a usable role.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Where the role is looked up first.
    #[serde(default = "default_primary_source")]
    pub primary_source: RoleSourceConfig,
    /// Legacy location consulted only when the primary source has no row.
    #[serde(default = "default_legacy_source")]
    pub legacy_source: RoleSourceConfig,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            demo_label: default_demo_label(),
            default_role: default_role(),
            primary_source: default_primary_source(),
            legacy_source: default_legacy_source(),
        }
    }
}

/// A table holding one role row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSourceConfig {
    /// Table name.
    pub table: String,
    /// Column holding the user id.
    pub user_column: String,
    /// Column holding the role text.
    pub role_column: String,
}

impl RoleSourceConfig {
    /// Reject identifiers that are not plain `[A-Za-z_][A-Za-z0-9_.]*`.
    ///
    /// The names are interpolated into SQL, so anything else is refused.
    pub fn validate(&self, section: &str) -> Result<(), AppError> {
        for (field, value) in [
            ("table", &self.table),
            ("user_column", &self.user_column),
            ("role_column", &self.role_column),
        ] {
            if !is_safe_identifier(value) {
                return Err(AppError::configuration(format!(
                    "{section}.{field} is not a valid SQL identifier: '{value}'"
                )));
            }
        }
        Ok(())
    }
}

fn is_safe_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn default_demo_label() -> String {
    "demo".to_string()
}

fn default_role() -> String {
    "cashier".to_string()
}

fn default_primary_source() -> RoleSourceConfig {
    RoleSourceConfig {
        table: "user_roles".to_string(),
        user_column: "user_id".to_string(),
        role_column: "role".to_string(),
    }
}

fn default_legacy_source() -> RoleSourceConfig {
    RoleSourceConfig {
        table: "profiles".to_string(),
        user_column: "id".to_string(),
        role_column: "role".to_string(),
    }
}
