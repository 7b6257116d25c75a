//! Role resolution and the process-wide session context.

pub mod context;
pub mod resolver;
pub mod snapshot;

pub use context::{AccessView, SessionContext};
pub use resolver::RoleResolver;
pub use snapshot::AccessSnapshot;

#[cfg(test)]
pub(crate) mod fakes;
