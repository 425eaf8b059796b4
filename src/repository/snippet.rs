use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::RepositoryError;
use crate::domain::Snippet;

/// Fixed read-path limit for the latest listing. No pagination.
const LATEST_LIMIT: i64 = 10;

#[async_trait]
pub trait SnippetRepository {
    /// Inserts a snippet whose creation and expiry timestamps are computed by
    /// the database itself, avoiding clock skew between tiers. Returns the
    /// generated id.
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<i64, RepositoryError>;

    /// Returns a snippet only while its expiry is strictly in the future.
    /// Expired and never-existed both collapse into `NotFound`.
    async fn get(&self, id: i64) -> Result<Snippet, RepositoryError>;

    /// Up to ten non-expired snippets, most recent first.
    async fn latest(&self) -> Result<Vec<Snippet>, RepositoryError>;
}

#[derive(Clone)]
pub struct PgSnippetRepository {
    pool: PgPool,
}

impl PgSnippetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_snippet(row: PgRow) -> Result<Snippet, RepositoryError> {
    Ok(Snippet {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get("created")?,
        expires: row.try_get("expires")?,
    })
}

#[async_trait]
impl SnippetRepository for PgSnippetRepository {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<i64, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, now(), now() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(expires_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("id")?)
    }

    async fn get(&self, id: i64) -> Result<Snippet, RepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > now() AND id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match maybe_row {
            Some(row) => map_row_to_snippet(row),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn latest(&self) -> Result<Vec<Snippet>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > now()
            ORDER BY created DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_row_to_snippet).collect()
    }
}
