//! # till-cli
//!
//! The `till` command line: inspect the permission table, resolve the role
//! behind an access token, and run post-mutation cache refreshes by hand.

pub mod commands;
pub mod output;

pub use commands::Cli;
