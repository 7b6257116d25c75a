//! Role lookups against the primary and legacy role tables.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use till_core::config::RoleSourceConfig;
use till_core::error::{AppError, ErrorKind};
use till_core::result::AppResult;
use till_core::traits::RoleStore;

/// sqlx-backed [`RoleStore`].
///
/// Table and column names come from validated configuration; the user id
/// is always a bound parameter.
#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    /// Create a new role store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the single-row lookup for one role source.
pub(crate) fn role_query(source: &RoleSourceConfig) -> String {
    format!(
        "SELECT {role}::text FROM {table} WHERE {user} = $1 LIMIT 1",
        role = source.role_column,
        table = source.table,
        user = source.user_column,
    )
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_role(
        &self,
        source: &RoleSourceConfig,
        user_id: Uuid,
    ) -> AppResult<Option<String>> {
        source.validate("role source")?;

        let sql = role_query(source);
        let row: Option<Option<String>> = sqlx::query_scalar(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to look up role in '{}'", source.table),
                    e,
                )
            })?;

        let role = row.flatten();
        debug!(table = %source.table, %user_id, found = role.is_some(), "Role lookup");
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_query_shape() {
        let source = RoleSourceConfig {
            table: "profiles".to_string(),
            user_column: "id".to_string(),
            role_column: "role".to_string(),
        };
        assert_eq!(
            role_query(&source),
            "SELECT role::text FROM profiles WHERE id = $1 LIMIT 1"
        );
    }
}
