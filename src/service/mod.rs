//! Record Service
//!
//! The single authority that turns requests into validated store calls.
//! Callers at the HTTP boundary never reach the store directly.

mod errors;
mod record_service;

pub use errors::{ServiceError, ServiceResult};
pub use record_service::RecordService;
