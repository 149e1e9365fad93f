//! enrolldb - student enrollment records
//!
//! Validation, sparse-update merging and filtered search over student
//! records, served through a thin HTTP layer.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod service;
pub mod store;
pub mod student;
pub mod validation;
