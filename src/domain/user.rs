use chrono::{DateTime, Utc};
use thiserror::Error;

/// A registered account. `active` gates authentication; `email` carries a
/// unique constraint enforced by storage, not pre-checked by the application.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: HashedPassword,
    pub created: DateTime<Utc>,
    pub active: bool,
}

/// Opaque bcrypt output. Holding the hash behind a newtype keeps plaintext
/// and hash from being mixed up at call sites.
#[derive(Debug, Clone)]
pub struct HashedPassword(String);

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("password hash cannot be empty")]
    Empty,
}

impl HashedPassword {
    pub fn new(hash: String) -> Result<Self, PasswordHashError> {
        if hash.trim().is_empty() {
            return Err(PasswordHashError::Empty);
        }
        Ok(Self(hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
