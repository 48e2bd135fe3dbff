//! Sign-in / sign-up form state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the auth modal: holds the field drafts, validates required fields
//! before calling the controller, and turns any controller failure into the
//! one user-facing failure message.

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use std::fmt;

use crate::session::SessionController;
use crate::state::auth::AuthState;
use crate::user::User;

pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    /// Form heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    /// Submit button label.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("Authentication failed. Please try again.")]
    Auth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Message shown above the fields after a failed submit.
    pub error: Option<String>,
}

impl AuthForm {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Switch between sign-in and sign-up. Drafts are kept, the error is not.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    /// Fields are locked while an attempt is in flight.
    #[must_use]
    pub fn is_submitting(state: &AuthState) -> bool {
        state.loading
    }

    fn validate(&self) -> Result<(), FormError> {
        if self.mode == AuthMode::SignUp && self.name.trim().is_empty() {
            return Err(FormError::MissingField(Field::Name));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField(Field::Email));
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField(Field::Password));
        }
        Ok(())
    }

    /// Validate and submit through `controller`.
    ///
    /// Success clears every field. Failure leaves the drafts in place and
    /// records the message in `error`.
    pub async fn submit(&mut self, controller: &SessionController) -> Result<User, FormError> {
        self.error = None;
        let result = match self.validate() {
            Ok(()) => self.send(controller).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(user) => {
                self.name.clear();
                self.email.clear();
                self.password.clear();
                Ok(user)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn send(&self, controller: &SessionController) -> Result<User, FormError> {
        let outcome = match self.mode {
            AuthMode::SignIn => controller.login(&self.email, &self.password).await,
            AuthMode::SignUp => controller.signup(&self.name, &self.email, &self.password).await,
        };
        outcome.map_err(|_| FormError::Auth)
    }
}
