//! Persistence collaborators
//!
//! The service talks to storage only through [`StudentStore`]. Stores
//! assign identity on insert and keep records in insertion order.
//!
//! Concurrent replaces of the same record are last-write-wins; a store
//! that needs stronger guarantees can reject stale writes from `replace`.

mod config;
mod errors;
mod file;
mod memory;

use std::sync::Arc;

pub use config::StorageConfig;
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::query::StudentFilter;
use crate::student::{StudentId, StudentProfile, StudentRecord};

/// Storage operations the record service depends on.
pub trait StudentStore: Send + Sync {
    /// Store a validated profile under a freshly assigned id
    fn insert(&self, profile: StudentProfile) -> StoreResult<StudentRecord>;

    fn find_by_id(&self, id: &StudentId) -> StoreResult<Option<StudentRecord>>;

    /// All records matching `filter`, in the store's natural order
    fn find_matching(&self, filter: &StudentFilter) -> StoreResult<Vec<StudentRecord>>;

    /// Overwrite an existing record. `None` if `id` is unknown.
    fn replace(&self, id: &StudentId, profile: StudentProfile) -> StoreResult<Option<StudentRecord>>;

    /// `true` if a record was removed
    fn remove(&self, id: &StudentId) -> StoreResult<bool>;
}

/// Open the store described by `config`
pub fn open_store(config: &StorageConfig) -> StoreResult<Arc<dyn StudentStore>> {
    match config {
        StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageConfig::File { path } => Ok(Arc::new(FileStore::open(path)?)),
    }
}
