//! # HTTP Server Module
//!
//! Thin axum boundary over the record service.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/students` - Search and create
//! - `/api/students/:id` - Read, update, delete
//! - `/observability/metrics` - Operation counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod student_routes;

pub use config::{HttpConfigError, HttpServerConfig, DEFAULT_PORT};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use student_routes::{student_routes, StudentsState};
