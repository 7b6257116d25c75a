//! Role and permission domain types.

pub mod permission;
#[allow(clippy::module_inception)]
pub mod role;

pub use permission::{Permission, PermissionSet};
pub use role::Role;
