use super::*;

#[test]
fn memory_storage_round_trips_values() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    storage.set("token", "abc").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("abc"));
    storage.set("token", "def").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("def"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    storage.set("k", "v").unwrap();
    assert_eq!(other.get("k").as_deref(), Some("v"));
    other.remove("k");
    assert!(storage.get("k").is_none());
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("missing");
    assert!(storage.is_empty());
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_inert_outside_the_browser() {
    let storage = BrowserStorage;
    assert!(storage.get("token").is_none());
    assert!(matches!(storage.set("token", "abc"), Err(StorageError::Unavailable)));
    storage.remove("token");
}
