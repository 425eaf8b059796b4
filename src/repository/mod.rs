pub mod snippet;
pub mod user;

use thiserror::Error;

use crate::domain::PasswordHashError;
use crate::util::password::PasswordError;

#[allow(unused_imports)]
pub use snippet::{PgSnippetRepository, SnippetRepository};
#[allow(unused_imports)]
pub use user::{PgUserRepository, UserRepository};

/// Closed set of storage outcomes consumed by the service layer. The first
/// three variants are the ones callers act on; everything else is opaque and
/// non-recoverable for the current request.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no matching record found")]
    NotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password error: {0}")]
    Password(#[from] PasswordError),
    #[error("domain error: {0}")]
    Domain(#[from] PasswordHashError),
}

/// The single place where engine-specific insert failures are interpreted.
/// Postgres reports a unique-email rejection as a unique violation naming the
/// `users_uc_email` constraint; anything else stays opaque.
pub(crate) fn classify_insert_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation()
            && db_err
                .constraint()
                .is_some_and(|name| name.contains("users_uc_email"))
        {
            return RepositoryError::DuplicateEmail;
        }
    }
    RepositoryError::Database(err)
}
