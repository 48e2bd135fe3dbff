//! Session store: current user + loading flag, persisted under one key.
//!
//! DESIGN
//! ======
//! State lives in a `watch` channel so any number of renderers can subscribe
//! and always see the latest value. `set` writes storage before publishing,
//! which keeps memory and storage in agreement when the write fails.
//!
//! ERROR HANDLING
//! ==============
//! Restore never fails: missing, unreadable or malformed entries all start
//! the client signed out. The cause is logged, not returned.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::auth::AuthState;
use crate::storage::{KeyValueStore, StorageError};
use crate::user::User;

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    state: watch::Sender<AuthState>,
    /// Serializes storage writes with their in-memory publish.
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Store over `storage`, not yet restored: no user, `loading == true`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), state: watch::Sender::new(AuthState::default()), write_lock: Mutex::new(()) }
    }

    /// Create a store and immediately restore any persisted user.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        store.restore();
        store
    }

    /// Load the persisted user, if any, and finish loading.
    pub fn restore(&self) -> AuthState {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let user = self.read_persisted();
        debug!(key = %self.key, restored = user.is_some(), "session restored");
        self.state.send_modify(|state| {
            state.user = user;
            state.loading = false;
        });
        self.snapshot()
    }

    fn read_persisted(&self) -> Option<User> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "session storage unreadable; starting signed out");
                return None;
            }
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed persisted session; starting signed out");
                None
            }
        }
    }

    /// Replace the current user and persist it.
    ///
    /// On a storage failure nothing changes, in memory or on disk.
    pub fn set(&self, user: User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&user)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.set(&self.key, &raw)?;
        self.state.send_modify(|state| state.user = Some(user));
        Ok(())
    }

    /// Drop the current user and delete the persisted entry.
    ///
    /// The in-memory session is always cleared. A failed delete is logged;
    /// the stale entry would then come back on the next restore.
    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "failed to delete persisted session");
        }
        self.state.send_modify(|state| state.user = None);
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
