//! File Store Durability Tests
//!
//! Records written through the service must survive reopening the
//! snapshot file, and nothing partial is left behind.

use std::sync::Arc;

use enrolldb::query::SearchParams;
use enrolldb::service::RecordService;
use enrolldb::store::{open_store, FileStore, StorageConfig};
use serde_json::json;
use tempfile::TempDir;

fn candidate(name: &str) -> serde_json::Value {
    json!({
        "fullname": name,
        "class": "10A",
        "mobileNumber": "555",
        "enrollmentNumber": "E100",
        "referenceNumber": "R1",
        "emailId": "a@x.com",
        "balance": "12.5",
        "address": "1 Rd",
        "stream": "Stream-2",
        "courses": [{"courseCode": "C1", "subject": "Math"}]
    })
}

/// Create, update and delete are visible after reopening.
#[test]
fn test_operations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.json");

    let (kept, dropped) = {
        let service = RecordService::new(Arc::new(FileStore::open(&path).unwrap()));
        let kept = service.create(&candidate("Ana Li")).unwrap();
        let dropped = service.create(&candidate("Bo Chen")).unwrap();
        service
            .update(&kept.id, &json!({"referenceNumber": null, "balance": 3}))
            .unwrap();
        service.delete(&dropped.id).unwrap();
        (kept, dropped)
    };

    let service = RecordService::new(Arc::new(FileStore::open(&path).unwrap()));
    let record = service.get_by_id(&kept.id).unwrap();
    assert_eq!(record.profile.reference_number, None);
    assert_eq!(record.profile.balance, 3.0);
    assert!(service.get_by_id(&dropped.id).is_err());
    assert_eq!(service.search(&SearchParams::default()).unwrap().len(), 1);
}

/// Config-driven opening creates the file and leaves no temp file.
#[test]
fn test_open_store_from_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("students.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let store = open_store(&StorageConfig::File { path: path.clone() }).unwrap();
    let service = RecordService::new(store);
    service.create(&candidate("Ana Li")).unwrap();

    assert!(path.exists());
    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
