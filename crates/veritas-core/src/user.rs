//! Player accounts.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Opaque secret compared verbatim on login.
    pub password_hash: String,
}

impl User {
    /// A new user with a fresh identifier.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns true if `identifier` is this user's username or email.
    pub fn answers_to(&self, identifier: &str) -> bool {
        self.username == identifier || self.email == identifier
    }
}
