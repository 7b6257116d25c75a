//! # till-entity
//!
//! Domain types shared by every Till surface: roles, permissions, sessions,
//! and the logical modules used as cache invalidation units.

pub mod module;
pub mod role;
pub mod session;

pub use module::ModuleName;
pub use role::{Permission, PermissionSet, Role};
pub use session::{AccessState, DemoSession, RoleOrigin, Session, UserSession};
