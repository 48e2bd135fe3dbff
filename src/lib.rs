//! Client session core for the SignBridge landing page.
//!
//! ARCHITECTURE
//! ============
//! - `storage`: per-client key-value storage (memory or JSON file).
//! - `session`: the session store and the mocked auth controller.
//! - `state`: the `AuthState` snapshot presentation code renders from.
//! - `form`: the sign-in/sign-up form that validates and submits.
//!
//! There is no backend. `login` and `signup` accept any credentials after a
//! simulated delay and fabricate the user locally.

pub mod config;
pub mod form;
pub mod session;
pub mod state;
pub mod storage;
pub mod user;

pub use config::SessionConfig;
pub use form::{AuthForm, AuthMode, FormError};
pub use session::{AuthError, SessionController, SessionStore};
pub use state::auth::AuthState;
pub use user::User;
