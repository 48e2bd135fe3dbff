//! Mocked authentication: every credential is accepted after a fixed delay.
//!
//! DESIGN
//! ======
//! Attempts run on a spawned task and are serialized by an async mutex. The
//! spawned task keeps an attempt alive after its caller goes away (a closed
//! form still signs the user in), and the mutex guarantees one attempt at a
//! time resolves the store. A second `login`/`signup` queues behind the first.
//!
//! `loading` is raised when the first attempt is accepted and lowered when
//! the last pending one finishes, however it finishes. Queued attempts never
//! show a settled state in between.
//!
//! ERROR HANDLING
//! ==============
//! Callers see a single `AuthError::Failed`. The underlying cause (storage
//! write, panicked attempt) is kept as the error source for logs.

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::store::SessionStore;
use crate::config::SessionConfig;
use crate::user::User;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication failed")]
    Failed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AuthError {
    fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed { source: source.into() }
    }
}

#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    store: Arc<SessionStore>,
    /// Simulated verification round-trip.
    latency: Duration,
    avatar_base_url: String,
    /// Display name given to every `login` user.
    default_name: String,
    in_flight: Mutex<()>,
    /// Attempts accepted but not yet finished, queued ones included.
    pending: StdMutex<usize>,
}

impl SessionController {
    #[must_use]
    pub fn new(store: Arc<SessionStore>, config: &SessionConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                store,
                latency: config.latency,
                avatar_base_url: config.avatar_base_url.clone(),
                default_name: config.default_name.clone(),
                in_flight: Mutex::new(()),
                pending: StdMutex::new(0),
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.inner.store
    }

    /// Sign in as `email`. The password is accepted without being checked.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        let name = self.inner.default_name.clone();
        let user = self.attempt(name, email.to_owned()).await?;
        info!(user_id = %user.id, email = %user.email, "login succeeded");
        Ok(user)
    }

    /// Register and sign in. `name` must already be validated as non-blank.
    pub async fn signup(&self, name: &str, email: &str, _password: &str) -> Result<User, AuthError> {
        let user = self.attempt(name.to_owned(), email.to_owned()).await?;
        info!(user_id = %user.id, email = %user.email, name = %user.name, "signup succeeded");
        Ok(user)
    }

    /// Sign out immediately. Does not wait for, or cancel, an in-flight attempt.
    pub fn logout(&self) {
        self.inner.store.clear();
        info!("logged out");
    }

    async fn attempt(&self, name: String, email: String) -> Result<User, AuthError> {
        let pending = PendingAttempt::begin(Arc::clone(&self.inner));
        let result = tokio::spawn(async move { pending.run(&name, &email).await })
            .await
            .map_err(AuthError::failed)
            .and_then(|r| r);
        if let Err(e) = &result {
            let AuthError::Failed { source } = e;
            warn!(error = %source, "authentication attempt failed");
        }
        result
    }
}

impl ControllerInner {
    async fn attempt(&self, name: &str, email: &str) -> Result<User, AuthError> {
        let _turn = self.in_flight.lock().await;
        self.verify(name, email).await
    }

    async fn verify(&self, name: &str, email: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;
        let user = User::fabricate(name, email, &self.avatar_base_url);
        self.store.set(user.clone()).map_err(AuthError::failed)?;
        Ok(user)
    }
}

/// One accepted attempt. Holds `loading` up until dropped.
struct PendingAttempt {
    inner: Arc<ControllerInner>,
}

impl PendingAttempt {
    fn begin(inner: Arc<ControllerInner>) -> Self {
        {
            let mut pending = inner.pending.lock().unwrap_or_else(PoisonError::into_inner);
            *pending += 1;
            inner.store.set_loading(true);
        }
        Self { inner }
    }

    /// Consumes the guard, so `loading` is released on return or unwind.
    async fn run(self, name: &str, email: &str) -> Result<User, AuthError> {
        self.inner.attempt(name, email).await
    }
}

impl Drop for PendingAttempt {
    fn drop(&mut self) {
        let mut pending = self.inner.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.inner.store.set_loading(false);
        }
    }
}
