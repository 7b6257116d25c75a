//! Role store trait for looking up a user's role row.

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::RoleSourceConfig;
use crate::result::AppResult;

/// Structured store holding at most one role row per user and table.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the raw role text for `user_id` in `source`, or `None` when
    /// the table has no row (or a NULL role) for that user.
    async fn find_role(
        &self,
        source: &RoleSourceConfig,
        user_id: Uuid,
    ) -> AppResult<Option<String>>;
}
