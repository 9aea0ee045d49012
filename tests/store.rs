use tempfile::tempdir;
use uuid::Uuid;

use sheetboard::data::CellValue;
use sheetboard::dataset::Caller;
use sheetboard::error::CoreError;
use sheetboard::store::{DatasetStore, FileStore, MemoryStore, NewDataset};

fn new_dataset(owner: &str, filename: &str) -> NewDataset {
    NewDataset {
        owner_id: owner.to_string(),
        filename: filename.to_string(),
        headers: vec!["label".to_string(), "value".to_string()],
        records: vec![vec![
            CellValue::Text("a".into()),
            CellValue::Number(1.0),
        ]],
        category: "Sales".to_string(),
        quality: 90,
    }
}

#[test]
fn save_assigns_identity_and_timestamp() {
    let mut store = MemoryStore::new();
    let first = store.save(new_dataset("alice", "one.xlsx")).expect("save");
    let second = store.save(new_dataset("alice", "two.xlsx")).expect("save");

    assert_ne!(first.id, second.id);
    assert_eq!(first.chart_count, 0);
    assert_eq!(first.insight_count, 0);
    assert!(second.created_at >= first.created_at);
}

#[test]
fn listing_is_newest_first_and_scoped_to_owner() {
    let mut store = MemoryStore::new();
    store.save(new_dataset("alice", "one.xlsx")).expect("save");
    store.save(new_dataset("bob", "theirs.xlsx")).expect("save");
    store.save(new_dataset("alice", "two.xlsx")).expect("save");

    let listed = store.list_by_owner("alice").expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].filename, "two.xlsx");
    assert_eq!(listed[1].filename, "one.xlsx");
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn get_distinguishes_missing_from_forbidden() {
    let mut store = MemoryStore::new();
    let saved = store.save(new_dataset("alice", "one.xlsx")).expect("save");

    let missing = store.get_by_id(Uuid::new_v4(), &Caller::user("alice"));
    assert!(matches!(missing, Err(CoreError::NotFound(_))));

    let forbidden = store.get_by_id(saved.id, &Caller::user("bob"));
    assert!(matches!(forbidden, Err(CoreError::AccessDenied)));

    let owner = store.get_by_id(saved.id, &Caller::user("alice"));
    assert!(owner.is_ok());

    let admin = store.get_by_id(saved.id, &Caller::admin("carol"));
    assert!(admin.is_ok());
}

#[test]
fn delete_enforces_the_same_access_rules() {
    let mut store = MemoryStore::new();
    let saved = store.save(new_dataset("alice", "one.xlsx")).expect("save");

    let forbidden = store.delete(saved.id, &Caller::user("bob"));
    assert!(matches!(forbidden, Err(CoreError::AccessDenied)));
    assert!(store.get_by_id(saved.id, &Caller::user("alice")).is_ok());

    store
        .delete(saved.id, &Caller::admin("carol"))
        .expect("admin delete");
    let gone = store.get_by_id(saved.id, &Caller::user("alice"));
    assert!(matches!(gone, Err(CoreError::NotFound(_))));
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("datasets.store");

    let saved = {
        let mut store = FileStore::open(&path).expect("open");
        store.save(new_dataset("alice", "one.xlsx")).expect("save")
    };

    let reopened = FileStore::open(&path).expect("reopen");
    let fetched = reopened
        .get_by_id(saved.id, &Caller::user("alice"))
        .expect("get after reopen");
    assert_eq!(fetched.filename, "one.xlsx");
    assert_eq!(fetched.records, saved.records);
    assert_eq!(fetched.created_at, saved.created_at);
}

#[test]
fn file_store_delete_persists() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("datasets.store");

    let mut store = FileStore::open(&path).expect("open");
    let saved = store.save(new_dataset("alice", "one.xlsx")).expect("save");
    store
        .delete(saved.id, &Caller::user("alice"))
        .expect("delete");
    drop(store);

    let reopened = FileStore::open(&path).expect("reopen");
    assert!(reopened.list_by_owner("alice").expect("list").is_empty());
}

#[test]
fn corrupt_store_file_surfaces_a_storage_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("datasets.store");
    std::fs::write(&path, b"\x00\x01garbage").expect("write");

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
}
