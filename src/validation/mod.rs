//! Record validation
//!
//! Pure functions from a submitted JSON candidate to either a normalized
//! value or the complete list of field defects.
//!
//! # Rules
//!
//! - Create requires every required field, a known stream and at least one course
//! - Update validates only the fields that are present
//! - Defects are collected in one pass, never short-circuited
//! - No side effects

mod errors;
mod validator;

pub use errors::{DefectReason, FieldDefect};
pub use validator::{validate_for_create, validate_for_update, ROOT_FIELD};
