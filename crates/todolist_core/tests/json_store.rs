use std::fs;
use todolist_core::{JsonFileStore, StoreError, TodoRecord, TodoStore};
use uuid::Uuid;

#[test]
fn open_creates_empty_file_and_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("todos.json");

    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn put_then_get_roundtrip() {
    let mut store = JsonFileStore::in_memory();
    let id = Uuid::new_v4();
    let record = TodoRecord {
        text: "Buy milk".to_string(),
        timestamp: "2025-06-01T08:00:00.000001".to_string(),
        completed: true,
    };

    store.put(id, record.clone()).unwrap();
    assert_eq!(store.get(id).unwrap(), record);
}

#[test]
fn put_overwrites_whole_record() {
    let mut store = JsonFileStore::in_memory();
    let id = Uuid::new_v4();
    store
        .put(id, TodoRecord::with_timestamp("old", "2025-01-01T00:00:00.000000"))
        .unwrap();
    store
        .put(id, TodoRecord::with_timestamp("new", "2025-02-01T00:00:00.000000"))
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).unwrap().text, "new");
}

#[test]
fn get_missing_returns_not_found() {
    let store = JsonFileStore::in_memory();
    let id = Uuid::new_v4();
    let err = store.get(id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
}

#[test]
fn delete_twice_is_same_as_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let mut store = JsonFileStore::open(&path).unwrap();
    let keep = Uuid::new_v4();
    let gone = Uuid::new_v4();
    store.put(keep, TodoRecord::new("keep")).unwrap();
    store.put(gone, TodoRecord::new("gone")).unwrap();

    assert!(store.delete(gone).unwrap());
    let after_first = fs::read_to_string(&path).unwrap();
    assert!(!store.delete(gone).unwrap());
    let after_second = fs::read_to_string(&path).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(store.keys(), vec![keep]);
}

#[test]
fn mutations_persist_across_reopen_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();

    {
        let mut store = JsonFileStore::open(&path).unwrap();
        store.put(first, TodoRecord::new("one")).unwrap();
        store.put(second, TodoRecord::new("two")).unwrap();
        store.put(third, TodoRecord::new("three")).unwrap();
        store.delete(second).unwrap();
    }

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.keys(), vec![first, third]);
    assert_eq!(reopened.get(third).unwrap().text, "three");
}

#[test]
fn persisted_layout_is_object_keyed_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();

    let mut store = JsonFileStore::open(&path).unwrap();
    store
        .put(id, TodoRecord::with_timestamp("Task", "2025-06-01T08:00:00.000000"))
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let value = &json["11111111-2222-4333-8444-555555555555"];
    assert_eq!(value["text"], "Task");
    assert_eq!(value["timestamp"], "2025-06-01T08:00:00.000000");
    assert_eq!(value["completed"], false);
}

#[test]
fn open_reads_records_with_missing_fields_as_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(
        &path,
        r#"{"11111111-2222-4333-8444-555555555555": {"text": "legacy"}}"#,
    )
    .unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let record = store.get(id).unwrap();
    assert_eq!(record.text, "legacy");
    assert_eq!(record.timestamp, "");
    assert!(!record.completed);
}

#[test]
fn open_rejects_malformed_file_and_bad_keys() {
    let dir = tempfile::tempdir().unwrap();

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        JsonFileStore::open(&broken).unwrap_err(),
        StoreError::Json(_)
    ));

    let bad_key = dir.path().join("bad_key.json");
    fs::write(&bad_key, r#"{"not-a-uuid": {"text": "x"}}"#).unwrap();
    assert!(matches!(
        JsonFileStore::open(&bad_key).unwrap_err(),
        StoreError::InvalidData(_)
    ));
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let mut store = JsonFileStore::open(data_dir.join("todos.json")).unwrap();
    let kept = Uuid::new_v4();
    let other = Uuid::new_v4();
    let record = TodoRecord::with_timestamp("kept", "2025-06-01T08:00:00.000000");
    store.put(kept, record.clone()).unwrap();
    store
        .put(other, TodoRecord::with_timestamp("other", "2025-06-02T08:00:00.000000"))
        .unwrap();
    fs::remove_dir_all(&data_dir).unwrap();

    let fresh = Uuid::new_v4();
    assert!(matches!(
        store.put(fresh, TodoRecord::new("never written")).unwrap_err(),
        StoreError::Io(_)
    ));
    assert!(matches!(
        store.get(fresh).unwrap_err(),
        StoreError::NotFound(_)
    ));

    assert!(store.put(kept, record.with_completed(true)).is_err());
    assert_eq!(store.get(kept).unwrap(), record);

    assert!(store.delete(kept).is_err());
    assert_eq!(store.get(kept).unwrap(), record);
    assert_eq!(store.len(), 2);
    assert_eq!(store.keys(), vec![kept, other]);
}
