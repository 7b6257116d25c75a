//! # till-database
//!
//! PostgreSQL connection management and the sqlx-backed role store.
//! Row-level security in the database decides what each query may see; this
//! crate only issues the lookups.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::role::PgRoleStore;
