//! Operation counters
//!
//! - Counters only, monotonic, reset on process start
//! - Relaxed atomics; exact values, no cross-counter consistency

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for every record service outcome
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
    reads: AtomicU64,
    searches: AtomicU64,
    validation_rejections: AtomicU64,
    not_found: AtomicU64,
    persistence_failures: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_persistence_failures(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub reads: u64,
    pub searches: u64,
    pub validation_rejections: u64,
    pub not_found: u64,
    pub persistence_failures: u64,
}
