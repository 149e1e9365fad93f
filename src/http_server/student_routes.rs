//! Student HTTP Routes
//!
//! Endpoints for creating, reading, updating, deleting and searching
//! student records. Handlers only decode requests and encode results;
//! every decision is made by [`RecordService`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::query::SearchParams;
use crate::service::{RecordService, ServiceResult};
use crate::student::{StudentId, StudentRecord};

// ==================
// Shared State
// ==================

/// State shared across student handlers
pub struct StudentsState {
    pub service: RecordService,
}

impl StudentsState {
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    #[serde(rename = "_id")]
    pub id: StudentId,
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(state: Arc<StudentsState>) -> Router {
    Router::new()
        .route("/students", get(search_handler).post(create_handler))
        .route(
            "/students/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run a service call off the async workers; stores may block on I/O.
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::InvalidBody(e.body_text()))
}

// ==================
// Handlers
// ==================

async fn search_handler(
    State(state): State<Arc<StudentsState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<StudentRecord>>> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQueryParam(e.body_text()))?;
    let service = state.service.clone();
    let records = run_blocking(move || service.search(&params)).await?;
    Ok(Json(records))
}

async fn create_handler(
    State(state): State<Arc<StudentsState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudentRecord>)> {
    let candidate = body(payload)?;
    let service = state.service.clone();
    let record = run_blocking(move || service.create(&candidate)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentRecord>> {
    let id = StudentId::new(id);
    let service = state.service.clone();
    let record = run_blocking(move || service.get_by_id(&id)).await?;
    Ok(Json(record))
}

async fn update_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StudentRecord>> {
    let id = StudentId::new(id);
    let candidate = body(payload)?;
    let service = state.service.clone();
    let record = run_blocking(move || service.update(&id, &candidate)).await?;
    Ok(Json(record))
}

async fn delete_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = StudentId::new(id);
    let service = state.service.clone();
    let removed = id.clone();
    run_blocking(move || service.delete(&removed)).await?;
    Ok(Json(DeleteResponse { deleted: true, id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_router_builds() {
        let service = RecordService::new(Arc::new(MemoryStore::new()));
        let _router = student_routes(Arc::new(StudentsState::new(service)));
    }

    #[test]
    fn test_delete_response_shape() {
        let value = serde_json::to_value(DeleteResponse {
            deleted: true,
            id: StudentId::new("abc"),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"deleted": true, "_id": "abc"}));
    }
}
