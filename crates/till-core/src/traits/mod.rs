//! Traits for the external collaborators of the access layer.
//!
//! Defined here and implemented by the database, cache, auth, and service
//! crates (or by test fakes).

pub mod cache;
pub mod identity;
pub mod notifier;
pub mod role_store;

pub use cache::CacheProvider;
pub use identity::{Identity, IdentityProvider};
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use role_store::RoleStore;
