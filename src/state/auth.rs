//! Auth-session state for the current client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Published by `SessionStore` on every change. Navigation, side panel and
//! the auth form read it to decide between signed-in and signed-out
//! rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::Serialize;

use crate::user::User;

/// Authentication state tracking the current user and loading status.
///
/// `Default` is the pre-restore state: no user, still loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// True once restore has finished and nobody is signed in; the point at
/// which sign-in prompts should show.
#[must_use]
pub fn should_prompt_sign_in(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}
