//! Invalidates cached query groups after a mutation and tells the user how
//! it went.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use till_cache::CacheManager;
use till_core::traits::{Notice, Notifier};
use till_entity::module::ModuleName;

use super::modules::groups_for;

/// One cache group that could not be invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFailure {
    /// The group name.
    pub group: String,
    /// Why the invalidation failed.
    pub reason: String,
}

impl fmt::Display for GroupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.group, self.reason)
    }
}

/// What one invalidation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvalidationReport {
    /// Groups invalidated successfully, in the order they were issued.
    pub groups: Vec<String>,
    /// Cached entries removed across all groups.
    pub keys_removed: u64,
    /// Module names that had no entry in the module table.
    pub unknown_modules: Vec<String>,
}

/// Every group failure of one invalidation pass.
#[derive(Debug, Clone, Error)]
#[error("{} cache group(s) could not be refreshed: {}", .failures.len(), join(.failures))]
pub struct RefreshError {
    /// The failed groups.
    pub failures: Vec<GroupFailure>,
    /// What did succeed.
    pub report: InvalidationReport,
}

impl RefreshError {
    /// Names of the failed groups.
    pub fn failed_groups(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.group.as_str()).collect()
    }
}

fn join(failures: &[GroupFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of [`RefreshCoordinator::handle_success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Groups that were invalidated.
    pub report: InvalidationReport,
    /// Groups that were not.
    pub failures: Vec<GroupFailure>,
}

impl RefreshOutcome {
    /// Whether every group was invalidated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs cache invalidation after successful mutations.
#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    /// Query cache.
    cache: Arc<CacheManager>,
    /// Where success and warning notices go.
    notifier: Arc<dyn Notifier>,
}

impl RefreshCoordinator {
    /// Creates a new coordinator.
    pub fn new(cache: Arc<CacheManager>, notifier: Arc<dyn Notifier>) -> Self {
        Self { cache, notifier }
    }

    /// The cache groups `modules` map to, deduplicated, first occurrence wins.
    pub fn plan(modules: &[ModuleName]) -> Vec<&'static str> {
        let mut groups: Vec<&'static str> = Vec::new();
        for module in modules {
            for group in groups_for(module) {
                if !groups.contains(group) {
                    groups.push(group);
                }
            }
        }
        groups
    }

    /// Invalidate every cache group of `modules`.
    ///
    /// Groups are issued one at a time in order. A failing group does not
    /// stop the rest; all failures come back together.
    pub async fn invalidate(
        &self,
        modules: &[ModuleName],
    ) -> Result<InvalidationReport, RefreshError> {
        let mut report = InvalidationReport::default();
        let mut failures = Vec::new();

        for module in modules {
            if let ModuleName::Unknown(name) = module {
                debug!(module = %name, "No cache groups for module; skipping");
                if !report.unknown_modules.contains(name) {
                    report.unknown_modules.push(name.clone());
                }
            }
        }

        for group in Self::plan(modules) {
            match self.cache.invalidate_group(group).await {
                Ok(removed) => {
                    report.groups.push(group.to_string());
                    report.keys_removed += removed;
                }
                Err(e) => {
                    warn!(group, error = %e, "Cache group invalidation failed");
                    failures.push(GroupFailure {
                        group: group.to_string(),
                        reason: e.message.clone(),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(RefreshError { failures, report })
        }
    }

    /// Post-mutation helper: invalidate `primary` then `additional`, then
    /// show `message` as a success notice.
    ///
    /// The mutation already happened, so this never fails. Invalidation
    /// failures add one warning notice after the success notice.
    pub async fn handle_success(
        &self,
        primary: &ModuleName,
        message: &str,
        additional: &[ModuleName],
    ) -> RefreshOutcome {
        let modules: Vec<ModuleName> = std::iter::once(primary.clone())
            .chain(additional.iter().cloned())
            .collect();

        let (report, failures) = match self.invalidate(&modules).await {
            Ok(report) => (report, Vec::new()),
            Err(e) => (e.report, e.failures),
        };

        self.notifier.notify(Notice::success(message));
        if !failures.is_empty() {
            let groups = failures
                .iter()
                .map(|f| f.group.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            self.notifier.notify(Notice::warning(format!(
                "Saved, but some lists may be out of date until reloaded ({groups})"
            )));
        }

        info!(
            module = %primary,
            groups = report.groups.len(),
            failed = failures.len(),
            keys_removed = report.keys_removed,
            "Post-mutation refresh complete"
        );

        RefreshOutcome { report, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;
    use till_cache::keys;
    use till_cache::memory::MemoryCacheProvider;
    use till_core::config::cache::MemoryCacheConfig;
    use till_core::error::AppError;
    use till_core::result::AppResult;
    use till_core::traits::{CacheProvider, NoticeLevel};

    use crate::notify::BroadcastNotifier;

    /// Memory cache that refuses to delete the listed groups.
    #[derive(Debug)]
    struct FlakyCache {
        inner: MemoryCacheProvider,
        broken: HashSet<String>,
    }

    impl FlakyCache {
        fn new(broken: &[&str]) -> Self {
            Self {
                inner: MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60),
                broken: broken.iter().map(|g| g.to_string()).collect(),
            }
        }

        fn check(&self, key: &str) -> AppResult<()> {
            let group = key
                .strip_prefix("query:")
                .and_then(|rest| rest.split(':').next())
                .unwrap_or_default();
            if self.broken.contains(group) {
                return Err(AppError::cache(format!("connection reset on {group}")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CacheProvider for FlakyCache {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }
        async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
            self.inner.put(key, value, ttl).await
        }
        async fn remove(&self, key: &str) -> AppResult<bool> {
            self.check(key)?;
            self.inner.remove(key).await
        }
        async fn contains(&self, key: &str) -> AppResult<bool> {
            self.inner.contains(key).await
        }
        async fn remove_prefix(&self, prefix: &str) -> AppResult<u64> {
            self.check(prefix)?;
            self.inner.remove_prefix(prefix).await
        }
        async fn ping(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn coordinator(broken: &[&str]) -> (RefreshCoordinator, Arc<CacheManager>, BroadcastNotifier) {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(FlakyCache::new(broken))));
        let notifier = BroadcastNotifier::new(16);
        let coordinator = RefreshCoordinator::new(Arc::clone(&cache), Arc::new(notifier.clone()));
        (coordinator, cache, notifier)
    }

    #[test]
    fn test_plan_deduplicates_in_order() {
        let plan = RefreshCoordinator::plan(&[ModuleName::Sales, ModuleName::Expenses]);
        assert_eq!(
            plan,
            vec!["sales", "invoices", "dashboard", "expenses", "transactions"]
        );
    }

    #[tokio::test]
    async fn test_invalidate_accounts_clears_both_groups() {
        let (coordinator, cache, _) = coordinator(&[]);
        cache.put(&keys::query("accounts", "all"), "[]", None).await.unwrap();
        cache.put(&keys::query("transactions", "month=3"), "[]", None).await.unwrap();
        cache.put(&keys::query("customers", "all"), "[]", None).await.unwrap();

        let report = coordinator.invalidate(&[ModuleName::Accounts]).await.unwrap();
        assert_eq!(report.groups, vec!["accounts", "transactions"]);
        assert_eq!(report.keys_removed, 2);
        assert!(cache.contains(&keys::query("customers", "all")).await.unwrap());
    }

    #[tokio::test]
    async fn test_failures_are_aggregated_and_do_not_block() {
        let (coordinator, _, _) = coordinator(&["invoices", "transactions"]);
        let err = coordinator
            .invalidate(&[ModuleName::Sales, ModuleName::Accounts])
            .await
            .unwrap_err();
        assert_eq!(err.failed_groups(), vec!["invoices", "transactions"]);
        assert_eq!(err.report.groups, vec!["sales", "dashboard", "accounts"]);
        assert!(err.to_string().contains("2 cache group(s)"));
    }

    #[tokio::test]
    async fn test_unknown_module_is_noop() {
        let (coordinator, _, _) = coordinator(&[]);
        let report = coordinator.invalidate(&[ModuleName::from("zzz")]).await.unwrap();
        assert!(report.groups.is_empty());
        assert_eq!(report.unknown_modules, vec!["zzz"]);
    }

    #[tokio::test]
    async fn test_handle_success_notifies_once() {
        let (coordinator, _, notifier) = coordinator(&[]);
        let mut rx = notifier.subscribe();
        let outcome = coordinator
            .handle_success(&ModuleName::Products, "Saved", &[ModuleName::Inventory])
            .await;

        assert!(outcome.is_complete());
        assert_eq!(
            outcome.report.groups,
            vec!["products", "inventory", "stock_movements"]
        );
        assert_eq!(rx.try_recv().unwrap(), Notice::success("Saved"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_handle_success_warns_on_failure() {
        let (coordinator, _, notifier) = coordinator(&["dashboard"]);
        let mut rx = notifier.subscribe();
        let outcome = coordinator
            .handle_success(&ModuleName::Sales, "Sale recorded", &[])
            .await;

        assert!(!outcome.is_complete());
        assert_eq!(rx.try_recv().unwrap(), Notice::success("Sale recorded"));
        let warning = rx.try_recv().unwrap();
        assert_eq!(warning.level, NoticeLevel::Warning);
        assert!(warning.message.contains("dashboard"));
        assert!(rx.try_recv().is_err());
    }
}
