use std::sync::Arc;

use crate::dto::snippet::{CreateSnippetRequest, SnippetResponse};
use crate::repository::{RepositoryError, SnippetRepository};
use crate::util::AppError;
use crate::util::error::{BusinessError, InternalError, validation_fields};
use crate::util::validation::{Form, FormData};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const PERMITTED_EXPIRY_DAYS: [&str; 3] = ["365", "7", "1"];

#[derive(Clone)]
pub struct SnippetService<R: SnippetRepository + Send + Sync + 'static> {
    repository: Arc<R>,
}

impl<R> SnippetService<R>
where
    R: SnippetRepository + Send + Sync + 'static,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create(&self, payload: CreateSnippetRequest) -> Result<i64, AppError> {
        let data = FormData::from_iter([
            ("title", payload.title),
            ("content", payload.content),
            ("expires", payload.expires),
        ]);

        let mut form = Form::new(data);
        form.required(&["title", "content", "expires"]);
        form.max_length("title", MAX_TITLE_LENGTH);
        form.permitted_values("expires", &PERMITTED_EXPIRY_DAYS);

        if !form.is_valid() {
            return Err(BusinessError::Validation(validation_fields(form.errors())).into());
        }

        // permitted_values guarantees the parse succeeds
        let expires_days: i32 = form
            .value("expires")
            .parse()
            .map_err(|_| AppError::from(InternalError::Unknown))?;

        self.repository
            .insert(form.value("title"), form.value("content"), expires_days)
            .await
            .map_err(map_repository_error)
    }

    pub async fn get(&self, id: i64) -> Result<SnippetResponse, AppError> {
        let snippet = self
            .repository
            .get(id)
            .await
            .map_err(map_repository_error)?;
        Ok(snippet.into())
    }

    pub async fn latest(&self) -> Result<Vec<SnippetResponse>, AppError> {
        let snippets = self
            .repository
            .latest()
            .await
            .map_err(map_repository_error)?;
        Ok(snippets.into_iter().map(Into::into).collect())
    }
}

fn map_repository_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::from(BusinessError::NotFound),
        RepositoryError::InvalidCredentials => AppError::from(BusinessError::InvalidCredentials),
        other => {
            tracing::error!(error = %other, "snippet repository failure");
            AppError::from(InternalError::Database)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use tokio::sync::RwLock;

    use crate::domain::Snippet;

    #[derive(Default, Clone)]
    struct InMemorySnippetRepository {
        snippets: Arc<RwLock<Vec<Snippet>>>,
    }

    #[async_trait]
    impl SnippetRepository for InMemorySnippetRepository {
        async fn insert(
            &self,
            title: &str,
            content: &str,
            expires_days: i32,
        ) -> Result<i64, RepositoryError> {
            let mut snippets = self.snippets.write().await;
            let id = (snippets.len() + 1) as i64;
            let now = Utc::now();
            snippets.push(Snippet {
                id,
                title: title.to_string(),
                content: content.to_string(),
                created: now,
                expires: now + Duration::days(expires_days as i64),
            });
            Ok(id)
        }

        async fn get(&self, id: i64) -> Result<Snippet, RepositoryError> {
            let snippets = self.snippets.read().await;
            snippets
                .iter()
                .find(|s| s.id == id && s.expires > Utc::now())
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn latest(&self) -> Result<Vec<Snippet>, RepositoryError> {
            let snippets = self.snippets.read().await;
            let now = Utc::now();
            let mut live: Vec<Snippet> = snippets
                .iter()
                .filter(|s| s.expires > now)
                .cloned()
                .collect();
            live.sort_by(|a, b| b.created.cmp(&a.created));
            live.truncate(10);
            Ok(live)
        }
    }

    fn service() -> SnippetService<InMemorySnippetRepository> {
        SnippetService::new(InMemorySnippetRepository::default())
    }

    fn request(title: &str, content: &str, expires: &str) -> CreateSnippetRequest {
        CreateSnippetRequest {
            title: title.into(),
            content: content.into(),
            expires: expires.into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let service = service();
        let id = service
            .create(request("An old silent pond", "A frog jumps in", "7"))
            .await
            .unwrap();

        let snippet = service.get(id).await.unwrap();
        assert_eq!(snippet.title, "An old silent pond");
        assert!(snippet.expires > snippet.created);
    }

    #[tokio::test]
    async fn create_reports_every_violation_at_once() {
        let service = service();
        let err = service.create(request("", "", "14")).await.unwrap_err();

        match err {
            AppError::Business(BusinessError::Validation(fields)) => {
                assert_eq!(fields.len(), 3);
                assert!(fields.iter().any(|f| f.field == "title"));
                assert!(fields.iter().any(|f| f.field == "content"));
                assert!(
                    fields
                        .iter()
                        .any(|f| f.field == "expires" && f.message == "This field is invalid")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_overlong_title() {
        let service = service();
        let err = service
            .create(request(&"a".repeat(101), "content", "7"))
            .await
            .unwrap_err();

        match err {
            AppError::Business(BusinessError::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_snippet_is_not_found() {
        let service = service();
        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, AppError::Business(BusinessError::NotFound)));
    }

    #[tokio::test]
    async fn latest_excludes_expired_and_caps_at_ten() {
        let repo = InMemorySnippetRepository::default();
        let service = SnippetService::new(repo.clone());

        for i in 0..12 {
            repo.insert(&format!("snippet {i}"), "content", 7)
                .await
                .unwrap();
        }
        // bypass the service to plant an already-expired row
        repo.insert("expired", "content", -1).await.unwrap();

        let latest = service.latest().await.unwrap();
        assert_eq!(latest.len(), 10);
        assert!(latest.iter().all(|s| s.title != "expired"));
    }
}
