//! The error type shared by every Till crate.
//!
//! Authorization outcomes are never errors: a missing permission hides a
//! control, it does not fail an operation. `AppError` covers the plumbing
//! around that decision (configuration, tokens, role lookups, the cache).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The access token is missing, malformed, expired, or forged.
    Authentication,
    /// A value could not be parsed (role names, permission names).
    Validation,
    /// Configuration is missing or inconsistent.
    Configuration,
    /// The role store failed.
    Database,
    /// The query cache failed.
    Cache,
    /// The identity backend could not be reached.
    Unavailable,
    /// JSON encoding or decoding failed.
    Serialization,
    /// Filesystem access failed.
    Io,
}

impl ErrorKind {
    /// Stable lowercase name, used in log fields and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Unavailable => "unavailable",
            Self::Serialization => "serialization",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error with a kind, a message for humans, and an optional cause.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct AppError {
    /// Category.
    pub kind: ErrorKind,
    /// Message shown in logs and the CLI.
    pub message: String,
    /// Underlying cause, when there is one.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// An error without a cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// An error wrapping `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }
}

// The boxed cause is not `Clone`; clones keep kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, err.to_string(), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, err.to_string(), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}
