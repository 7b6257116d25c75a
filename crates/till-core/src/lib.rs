//! # till-core
//!
//! Core crate for the Till access layer. Contains the traits of the external
//! collaborators (identity provider, role store, cache, notifier),
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Till crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
