//! # till-service
//!
//! Application services around the access layer: cache refresh after
//! mutations, user-facing notices, and the composition root that wires the
//! database, cache, identity, and session context together.
//!
//! Services follow constructor injection; all dependencies are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod notify;
pub mod refresh;

pub use context::AccessContext;
pub use notify::{BroadcastNotifier, TracingNotifier};
pub use refresh::{
    GroupFailure, InvalidationReport, RefreshCoordinator, RefreshError, RefreshOutcome,
};
