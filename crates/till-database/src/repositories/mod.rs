//! Repository implementations.

pub mod role;
