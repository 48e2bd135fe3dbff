//! Authenticated principal and the fabricated identities handed out by the
//! mocked auth flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! `User` is the only record persisted by the session store. Its JSON shape
//! (`id`, `name`, `email`, optional `avatar`) is the on-disk contract.

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Identifier given to every fabricated user.
pub const MOCK_USER_ID: &str = "1";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address; doubles as the login identifier. Not validated.
    pub email: String,
    /// Placeholder avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Build the mock user for `name`/`email`, with an initials avatar served
    /// from `avatar_base_url`.
    #[must_use]
    pub fn fabricate(name: &str, email: &str, avatar_base_url: &str) -> Self {
        Self {
            id: MOCK_USER_ID.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            avatar: Some(avatar_url(avatar_base_url, &initials(name))),
        }
    }
}

/// First character of each whitespace-separated token, in order.
///
/// Case is preserved: `"jane roe"` yields `"jr"`.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|token| token.chars().next()).collect()
}

/// Initials avatar URL in the `?seed=` form the placeholder service expects.
#[must_use]
pub fn avatar_url(base_url: &str, initials: &str) -> String {
    format!("{}?seed={initials}", base_url.trim_end_matches('/'))
}
