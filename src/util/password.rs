//! Password hashing and verification boundary. Kept narrow so the algorithm
//! can be swapped without touching call sites.

use bcrypt::{hash, verify};
use thiserror::Error;

/// Work factor applied to stored credentials. Slow enough to resist offline
/// brute force; tests override it downwards.
pub const DEFAULT_WORK_FACTOR: u32 = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hash failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("password is empty")]
    Empty,
}

pub fn hash_password(raw: &str, cost: u32) -> Result<String, PasswordError> {
    if raw.is_empty() {
        return Err(PasswordError::Empty);
    }
    // bcrypt rejects costs below 4
    let effective_cost = if cost < 4 { DEFAULT_WORK_FACTOR } else { cost };
    Ok(hash(raw, effective_cost)?)
}

/// Constant-time comparison is supplied by `bcrypt::verify`.
pub fn verify_password(raw: &str, hashed: &str) -> Result<bool, PasswordError> {
    if raw.is_empty() || hashed.is_empty() {
        return Err(PasswordError::Empty);
    }
    Ok(verify(raw, hashed)?)
}
