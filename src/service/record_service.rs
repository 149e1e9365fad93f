//! Create, read, update, delete and search over student records.
//!
//! Write paths validate before touching the store; a defect means no
//! store call is made at all. The service holds no state of its own
//! beyond counters, so operations may run concurrently.

use std::sync::Arc;

use serde_json::Value;

use super::errors::{ServiceError, ServiceResult};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::query::{build_filter, SearchParams};
use crate::store::{StoreError, StudentStore};
use crate::student::{StudentId, StudentRecord};
use crate::validation::{validate_for_create, validate_for_update, FieldDefect};

/// Orchestrates validation, filtering and persistence
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn StudentStore>,
    metrics: Arc<MetricsRegistry>,
}

impl RecordService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self::with_metrics(store, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(store: Arc<dyn StudentStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Validate and store a new record.
    ///
    /// # Errors
    ///
    /// `Validation` with every defect, or `Persistence` if the store fails.
    pub fn create(&self, candidate: &Value) -> ServiceResult<StudentRecord> {
        let profile = validate_for_create(candidate).map_err(|d| self.rejected("create", d))?;

        let record = self
            .store
            .insert(profile)
            .map_err(|e| self.store_failed("create", e))?;

        self.metrics.increment_created();
        log_event_with_fields(Event::StudentCreated, &[("id", record.id.as_str())]);
        Ok(record)
    }

    /// Fetch a record unmodified
    pub fn get_by_id(&self, id: &StudentId) -> ServiceResult<StudentRecord> {
        let found = self
            .store
            .find_by_id(id)
            .map_err(|e| self.store_failed("get", e))?;
        self.metrics.increment_reads();
        found.ok_or_else(|| self.not_found("get", id))
    }

    /// Apply a sparse patch and return the full merged record.
    ///
    /// Fields absent from `candidate` keep their stored values. An empty
    /// patch returns the stored record without writing.
    ///
    /// # Errors
    ///
    /// `Validation` (checked before the record is looked up), `NotFound`,
    /// or `Persistence`.
    pub fn update(&self, id: &StudentId, candidate: &Value) -> ServiceResult<StudentRecord> {
        let patch = validate_for_update(candidate).map_err(|d| self.rejected("update", d))?;

        let existing = self
            .store
            .find_by_id(id)
            .map_err(|e| self.store_failed("update", e))?
            .ok_or_else(|| self.not_found("update", id))?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let mut merged = existing.profile;
        patch.apply_to(&mut merged);

        let record = self
            .store
            .replace(id, merged)
            .map_err(|e| self.store_failed("update", e))?
            // Removed between lookup and replace
            .ok_or_else(|| self.not_found("update", id))?;

        self.metrics.increment_updated();
        let touched = patch.touched_fields().join(",");
        log_event_with_fields(
            Event::StudentUpdated,
            &[("id", record.id.as_str()), ("fields", touched.as_str())],
        );
        Ok(record)
    }

    /// Remove a record permanently
    pub fn delete(&self, id: &StudentId) -> ServiceResult<()> {
        let removed = self
            .store
            .remove(id)
            .map_err(|e| self.store_failed("delete", e))?;
        if !removed {
            return Err(self.not_found("delete", id));
        }

        self.metrics.increment_deleted();
        log_event_with_fields(Event::StudentDeleted, &[("id", id.as_str())]);
        Ok(())
    }

    /// Matching records in store order. No match is an empty list.
    pub fn search(&self, params: &SearchParams) -> ServiceResult<Vec<StudentRecord>> {
        let filter = build_filter(params);
        let records = self
            .store
            .find_matching(&filter)
            .map_err(|e| self.store_failed("search", e))?;

        self.metrics.increment_searches();
        let criteria = filter.criteria.len().to_string();
        let matched = records.len().to_string();
        log_event_with_fields(
            Event::StudentSearched,
            &[("criteria", criteria.as_str()), ("matched", matched.as_str())],
        );
        Ok(records)
    }

    fn rejected(&self, op: &str, defects: Vec<FieldDefect>) -> ServiceError {
        self.metrics.increment_validation_rejections();
        let fields = defects
            .iter()
            .map(|d| d.field.as_str())
            .collect::<Vec<_>>()
            .join(",");
        log_event_with_fields(
            Event::ValidationRejected,
            &[("op", op), ("fields", fields.as_str())],
        );
        ServiceError::Validation(defects)
    }

    fn not_found(&self, op: &str, id: &StudentId) -> ServiceError {
        self.metrics.increment_not_found();
        log_event_with_fields(Event::StudentNotFound, &[("op", op), ("id", id.as_str())]);
        ServiceError::NotFound(id.clone())
    }

    fn store_failed(&self, op: &str, err: StoreError) -> ServiceError {
        self.metrics.increment_persistence_failures();
        let reason = err.to_string();
        log_event_with_fields(
            Event::PersistenceFailed,
            &[("op", op), ("reason", reason.as_str())],
        );
        ServiceError::Persistence(err)
    }
}
