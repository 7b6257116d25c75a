//! Print the permission table.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use till_auth::PermissionEvaluator;
use till_core::error::AppError;
use till_entity::role::{Permission, Role};

/// Arguments for the permissions command
#[derive(Debug, Args)]
pub struct PermissionsArgs {
    /// Show one role in detail instead of the summary
    pub role: Option<String>,
}

/// One role in the summary
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role name
    role: String,
    /// Privilege level
    level: u8,
    /// Number of permissions
    count: usize,
    /// Granted permissions
    permissions: String,
}

/// One permission of a single role
#[derive(Debug, Serialize, Tabled)]
struct GrantRow {
    /// Permission name
    permission: &'static str,
    /// Whether it is granted
    granted: String,
}

/// Execute the permissions command
pub fn execute(args: &PermissionsArgs, format: OutputFormat) -> Result<(), AppError> {
    let evaluator = PermissionEvaluator::new();

    match &args.role {
        Some(name) => {
            let role: Role = name.parse()?;
            let rows: Vec<GrantRow> = Permission::ALL
                .into_iter()
                .map(|permission| GrantRow {
                    permission: permission.as_str(),
                    granted: output::yes_no(evaluator.has(&role, permission)),
                })
                .collect();
            output::print_list(&rows, format);
        }
        None => {
            let rows: Vec<RoleRow> = Role::ALL
                .into_iter()
                .map(|role| {
                    let set = evaluator.permissions_for(Some(&role));
                    RoleRow {
                        role: role.to_string(),
                        level: role.privilege_level(),
                        count: set.len(),
                        permissions: set.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", "),
                    }
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_is_an_error() {
        let args = PermissionsArgs {
            role: Some("owner".to_string()),
        };
        assert!(execute(&args, OutputFormat::Json).is_err());
    }

    #[test]
    fn test_known_role_prints() {
        let args = PermissionsArgs {
            role: Some("production_worker".to_string()),
        };
        assert!(execute(&args, OutputFormat::Table).is_ok());
    }
}
