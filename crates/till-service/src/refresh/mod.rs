//! Cache invalidation after successful mutations.

pub mod coordinator;
pub mod modules;

pub use coordinator::{
    GroupFailure, InvalidationReport, RefreshCoordinator, RefreshError, RefreshOutcome,
};
pub use modules::{groups_for, module_table};
