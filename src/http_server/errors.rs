//! # HTTP Errors
//!
//! Maps service failures onto status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::service::ServiceError;
use crate::validation::FieldDefect;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP boundary errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be decoded
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    // ==================
    // Service Errors
    // ==================
    #[error(transparent)]
    Service(#[from] ServiceError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Handler task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<FieldDefect>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let defects = match &err {
            ApiError::Service(service) => service.defects().to_vec(),
            _ => Vec::new(),
        };
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
            defects,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
