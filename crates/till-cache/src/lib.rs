//! # till-cache
//!
//! Cached query results for Till clients. Views store serialized results
//! under the keys from [`keys`]; after a mutation the refresh coordinator
//! drops whole groups through [`CacheManager::invalidate_group`].
//!
//! Backends, chosen by `cache.provider`:
//!
//! - `memory` (feature `memory`): moka, per process, per-entry lifetimes
//! - `redis` (feature `redis-backend`): shared across clients, namespaced keys

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
