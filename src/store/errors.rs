//! # Store Errors
//!
//! Failures of the persistence layer. The service propagates these
//! unchanged and never retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend cannot serve requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem failure
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stored data could not be decoded
    #[error("Corrupt store file {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    /// A writer panicked while holding the lock
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
