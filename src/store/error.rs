//! Entry store error types

use thiserror::Error;

/// Errors that can occur in the entry store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying database failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Requested entry does not exist
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// I/O failure while opening or creating the database
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
