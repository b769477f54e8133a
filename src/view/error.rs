//! Live view error types

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur in board view operations
///
/// Load failures never appear here: Load is log-and-continue and keeps the
/// previous list. Only Submit and Toggle surface errors to callers.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Submitted fields failed validation; no store call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Target entry is not in the active view
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    /// Backing store rejected the operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for view operations
pub type ViewResult<T> = Result<T, ViewError>;
