//! Session store and the mocked auth controller that drives it.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` owns the current user, the loading flag and the storage key
//! the user is persisted under. `SessionController` is the only caller that
//! toggles loading and the usual caller of `set`/`clear`. Presentation code
//! holds an `Arc<SessionStore>` and either snapshots it or subscribes.

pub mod controller;
pub mod store;

pub use controller::{AuthError, SessionController};
pub use store::SessionStore;
