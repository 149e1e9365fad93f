//! # Service Errors
//!
//! Every failure is terminal for the operation and never leaves a
//! partial write behind.

use thiserror::Error;

use crate::store::StoreError;
use crate::student::StudentId;
use crate::validation::FieldDefect;

/// Result type for record service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Record service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more field defects; nothing was persisted
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldDefect>),

    /// No record with this id
    #[error("Student not found: {0}")]
    NotFound(StudentId),

    /// Store failure, propagated unchanged
    #[error("{0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    /// Defects carried by a validation failure, empty otherwise
    pub fn defects(&self) -> &[FieldDefect] {
        match self {
            ServiceError::Validation(defects) => defects,
            _ => &[],
        }
    }
}

fn summarize(defects: &[FieldDefect]) -> String {
    defects
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
