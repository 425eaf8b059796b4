use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{RepositoryError, classify_insert_error};
use crate::domain::{HashedPassword, User};
use crate::util::password::{DEFAULT_WORK_FACTOR, PasswordError, hash_password, verify_password};

#[async_trait]
pub trait UserRepository {
    /// Hashes the plaintext before it reaches storage; the plaintext is never
    /// persisted or logged. A unique-email rejection surfaces as
    /// `DuplicateEmail` so callers can show a field-level message instead of
    /// a generic failure.
    async fn insert(&self, name: &str, email: &str, password: &str)
    -> Result<(), RepositoryError>;

    /// Returns the user id on success. A missing account, an inactive
    /// account and a password mismatch all yield the identical
    /// `InvalidCredentials`, so the caller cannot tell which half of the
    /// credential pair was wrong.
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, RepositoryError>;

    async fn get(&self, id: i64) -> Result<User, RepositoryError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    work_factor: u32,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            work_factor: DEFAULT_WORK_FACTOR,
        }
    }

    pub fn with_work_factor(pool: PgPool, work_factor: u32) -> Self {
        Self { pool, work_factor }
    }
}

fn map_row_to_user(row: PgRow) -> Result<User, RepositoryError> {
    let hashed: String = row.try_get("hashed_password")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        hashed_password: HashedPassword::new(hashed)?,
        created: row.try_get("created")?,
        active: row.try_get("active")?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), RepositoryError> {
        let hashed = hash_password(password, self.work_factor)?;

        sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, now())
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed)
        .execute(&self.pool)
        .await
        .map_err(classify_insert_error)?;

        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, RepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, hashed_password
            FROM users
            WHERE email = $1 AND active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = maybe_row else {
            return Err(RepositoryError::InvalidCredentials);
        };

        let id: i64 = row.try_get("id")?;
        let hashed: String = row.try_get("hashed_password")?;

        match verify_password(password, &hashed) {
            Ok(true) => Ok(id),
            Ok(false) | Err(PasswordError::Empty) => Err(RepositoryError::InvalidCredentials),
            Err(err) => Err(RepositoryError::Password(err)),
        }
    }

    async fn get(&self, id: i64) -> Result<User, RepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, name, email, hashed_password, created, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match maybe_row {
            Some(row) => map_row_to_user(row),
            None => Err(RepositoryError::NotFound),
        }
    }
}
