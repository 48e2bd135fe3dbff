use super::*;
use crate::storage::MemoryStore;

const KEY: &str = "user";

fn jane() -> User {
    User::fabricate("Jane Roe", "jane@example.com", "https://api.dicebear.com/7.x/initials/svg")
}

fn memory() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Storage whose writes always fail; reads return `stored`.
struct BrokenStore {
    stored: Option<String>,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored.clone())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("read-only")))
    }
}

// =============================================================================
// restore
// =============================================================================

#[test]
fn new_store_is_loading_and_signed_out() {
    let store = SessionStore::new(memory(), KEY);
    assert!(store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn restore_empty_storage_is_signed_out() {
    let store = SessionStore::new(memory(), KEY);
    let state = store.restore();
    assert!(!state.loading);
    assert!(state.user.is_none());
}

#[test]
fn set_then_restore_on_fresh_store_round_trips() {
    let storage = memory();
    let first = SessionStore::open(storage.clone(), KEY);
    first.set(jane()).unwrap();

    let second = SessionStore::open(storage, KEY);
    assert_eq!(second.user(), Some(jane()));
    assert!(second.is_authenticated());
    assert!(!second.is_loading());
}

#[test]
fn restore_non_json_value_is_signed_out() {
    let storage = memory();
    storage.set(KEY, "definitely not json").unwrap();
    let store = SessionStore::new(storage, KEY);
    let state = store.restore();
    assert!(!state.is_authenticated());
    assert!(!state.loading);
}

#[test]
fn restore_wrong_shape_is_signed_out() {
    let storage = memory();
    storage.set(KEY, r#"{"id":"1"}"#).unwrap();
    let store = SessionStore::open(storage, KEY);
    assert!(!store.is_authenticated());
}

#[test]
fn restore_reads_only_its_key() {
    let storage = memory();
    storage.set("other", &serde_json::to_string(&jane()).unwrap()).unwrap();
    let store = SessionStore::open(storage, KEY);
    assert!(!store.is_authenticated());
}

#[test]
fn restore_accepts_missing_avatar() {
    let storage = memory();
    storage.set(KEY, r#"{"id":"9","name":"Sam","email":"sam@example.com"}"#).unwrap();
    let store = SessionStore::open(storage, KEY);
    let user = store.user().unwrap();
    assert_eq!(user.id, "9");
    assert!(user.avatar.is_none());
}

// =============================================================================
// set / clear
// =============================================================================

#[test]
fn set_persists_json_under_key() {
    let storage = memory();
    let store = SessionStore::open(storage.clone(), KEY);
    store.set(jane()).unwrap();
    let raw = storage.get(KEY).unwrap().unwrap();
    let persisted: User = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, jane());
}

#[test]
fn set_replaces_existing_user() {
    let store = SessionStore::open(memory(), KEY);
    store.set(jane()).unwrap();
    let john = User::fabricate("John Doe", "john@example.com", "https://example.test");
    store.set(john.clone()).unwrap();
    assert_eq!(store.user(), Some(john));
}

#[test]
fn failed_set_leaves_state_unchanged() {
    let store = SessionStore::open(Arc::new(BrokenStore { stored: None }), KEY);
    assert!(store.set(jane()).is_err());
    assert!(!store.is_authenticated());
}

#[test]
fn clear_removes_user_and_entry() {
    let storage = memory();
    let store = SessionStore::open(storage.clone(), KEY);
    store.set(jane()).unwrap();
    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(storage.get(KEY).unwrap(), None);
}

#[test]
fn clear_twice_matches_clear_once() {
    let storage = memory();
    let store = SessionStore::open(storage.clone(), KEY);
    store.set(jane()).unwrap();
    store.clear();
    let once = store.snapshot();
    store.clear();
    assert_eq!(store.snapshot(), once);
    assert_eq!(storage.get(KEY).unwrap(), None);
}

#[test]
fn clear_with_failing_storage_still_signs_out() {
    let raw = serde_json::to_string(&jane()).unwrap();
    let store = SessionStore::open(Arc::new(BrokenStore { stored: Some(raw) }), KEY);
    assert!(store.is_authenticated());
    store.clear();
    assert!(!store.is_authenticated());
}

// =============================================================================
// subscribe
// =============================================================================

#[test]
fn subscribers_see_changes() {
    let store = SessionStore::open(memory(), KEY);
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.set(jane()).unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().user, Some(jane()));

    store.clear();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().user.is_none());
}

#[test]
fn set_loading_notifies_only_on_change() {
    let store = SessionStore::open(memory(), KEY);
    let mut rx = store.subscribe();
    store.set_loading(false);
    assert!(!rx.has_changed().unwrap());
    store.set_loading(true);
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().loading);
}
