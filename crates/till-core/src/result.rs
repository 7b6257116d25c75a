//! Convenience result type alias for Till.

use crate::error::AppError;

/// A specialized `Result` type for Till operations.
pub type AppResult<T> = Result<T, AppError>;
