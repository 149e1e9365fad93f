//! File-backed store
//!
//! The whole collection is kept in memory and snapshotted to a JSON file
//! after every change:
//!
//! 1. Serialize the updated collection
//! 2. Write it to `<path>.tmp` and fsync
//! 3. Rename over `<path>` and fsync the parent directory
//!
//! The in-memory state is swapped only after the rename succeeds, so a
//! failed write leaves both the file and the served data unchanged.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::memory::Collection;
use super::StudentStore;
use crate::query::StudentFilter;
use crate::student::{StudentId, StudentProfile, StudentRecord};

const FORMAT_VERSION: u8 = 1;

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    format_version: u8,
    students: Collection,
}

/// Student store persisted as a single JSON document
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    collection: RwLock<Collection>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty one if the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// `Corrupt` if the file exists but cannot be decoded, `Io` on read
    /// or initial write failure.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let collection = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            let file: StoreFile =
                serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            if file.format_version != FORMAT_VERSION {
                return Err(StoreError::Corrupt {
                    path,
                    message: format!("unsupported format_version {}", file.format_version),
                });
            }
            file.students
        } else {
            let empty = Collection::default();
            write_snapshot(&path, &empty)?;
            empty
        };

        Ok(Self {
            path,
            collection: RwLock::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the collection, persist it, then
    /// publish it.
    fn mutate<T>(&self, change: impl FnOnce(&mut Collection) -> T) -> StoreResult<T> {
        let mut guard = self.collection.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = guard.clone();
        let result = change(&mut next);

        if next != *guard {
            write_snapshot(&self.path, &next)?;
            *guard = next;
        }
        Ok(result)
    }
}

impl StudentStore for FileStore {
    fn insert(&self, profile: StudentProfile) -> StoreResult<StudentRecord> {
        self.mutate(|c| c.insert(profile))
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
        self.mutate(|c| c.replace(id, profile))
    }

    fn remove(&self, id: &StudentId) -> StoreResult<bool> {
        self.mutate(|c| c.remove(id))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_snapshot(path: &Path, collection: &Collection) -> StoreResult<()> {
    let file = StoreFile {
        format_version: FORMAT_VERSION,
        students: collection.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&file).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tmp = temp_path(path);
    let result = write_and_rename(&tmp, path, &bytes);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let mut out = File::create(tmp).map_err(|e| StoreError::io(tmp, e))?;
    out.write_all(bytes).map_err(|e| StoreError::io(tmp, e))?;
    out.sync_all().map_err(|e| StoreError::io(tmp, e))?;
    drop(out);

    fs::rename(tmp, path).map_err(|e| StoreError::io(path, e))?;

    // Make the rename itself durable
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let dir = OpenOptions::new()
            .read(true)
            .open(parent)
            .map_err(|e| StoreError::io(parent, e))?;
        dir.sync_all().map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::{CourseEntry, Stream};
    use tempfile::TempDir;

    fn profile(name: &str) -> StudentProfile {
        StudentProfile {
            full_name: name.to_string(),
            class_name: "10A".to_string(),
            mobile_number: "555".to_string(),
            enrollment_number: "E100".to_string(),
            reference_number: Some("R1".to_string()),
            email_id: "a@x.com".to_string(),
            balance: 12.5,
            address: "1 Rd".to_string(),
            stream: Stream::Stream2,
            courses: vec![CourseEntry::new("C1", "Math"), CourseEntry::new("C2", "Bio")],
        }
    }

    #[test]
    fn test_open_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("students.json");

        FileStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_records_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("students.json");

        let (kept, removed) = {
            let store = FileStore::open(&path).unwrap();
            let kept = store.insert(profile("Ana")).unwrap();
            let removed = store.insert(profile("Bo")).unwrap();
            store.remove(&removed.id).unwrap();
            (kept, removed)
        };

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.find_by_id(&kept.id).unwrap(), Some(kept));
        assert!(store.find_by_id(&removed.id).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("students.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_unknown_format_version_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("students.json");
        fs::write(&path, r#"{"format_version": 9, "students": []}"#).unwrap();

        assert!(matches!(
            FileStore::open(&path).unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        fs::create_dir(&dir).unwrap();
        let path = dir.join("students.json");

        let store = FileStore::open(&path).unwrap();
        let existing = store.insert(profile("Ana")).unwrap();

        // Take the directory away so the snapshot write fails
        fs::remove_dir_all(&dir).unwrap();

        assert!(store.insert(profile("Bo")).is_err());
        let all = store.find_matching(&StudentFilter::new()).unwrap();
        assert_eq!(all, vec![existing]);
    }
}
