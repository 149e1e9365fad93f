//! In-memory store
//!
//! Records live in a `Vec` so iteration order is insertion order.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::StudentStore;
use crate::query::StudentFilter;
use crate::student::{StudentId, StudentProfile, StudentRecord};

/// Ordered set of records shared by the memory and file stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(super) struct Collection {
    records: Vec<StudentRecord>,
}

impl Collection {
    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    fn position(&self, id: &StudentId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub(super) fn insert(&mut self, profile: StudentProfile) -> StudentRecord {
        let record = StudentRecord::new(StudentId::generate(), profile);
        self.records.push(record.clone());
        record
    }

    pub(super) fn get(&self, id: &StudentId) -> Option<StudentRecord> {
        self.records.iter().find(|r| &r.id == id).cloned()
    }

    pub(super) fn matching(&self, filter: &StudentFilter) -> Vec<StudentRecord> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub(super) fn replace(&mut self, id: &StudentId, profile: StudentProfile) -> Option<StudentRecord> {
        let index = self.position(id)?;
        let record = StudentRecord::new(id.clone(), profile);
        self.records[index] = record.clone();
        Some(record)
    }

    pub(super) fn remove(&mut self, id: &StudentId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Process-local student store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> StoreResult<usize> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl StudentStore for MemoryStore {
    fn insert(&self, profile: StudentProfile) -> StoreResult<StudentRecord> {
        let mut collection = self.collection.write().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.insert(profile))
    }

    fn find_by_id(&self, id: &StudentId) -> StoreResult<Option<StudentRecord>> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.get(id))
    }

    fn find_matching(&self, filter: &StudentFilter) -> StoreResult<Vec<StudentRecord>> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.matching(filter))
    }

    fn replace(&self, id: &StudentId, profile: StudentProfile) -> StoreResult<Option<StudentRecord>> {
        let mut collection = self.collection.write().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.replace(id, profile))
    }

    fn remove(&self, id: &StudentId) -> StoreResult<bool> {
        let mut collection = self.collection.write().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.remove(id))
    }
}
