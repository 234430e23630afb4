//! Convenience result type alias for ConvHub.

use crate::error::AppError;

/// A specialized `Result` type for ConvHub operations.
pub type AppResult<T> = Result<T, AppError>;
