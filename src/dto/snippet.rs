use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Snippet;

#[derive(Debug, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: String,
    pub content: String,
    /// Lifetime in days as posted by the form: "365", "7" or "1".
    pub expires: String,
}

#[derive(Debug, Serialize)]
pub struct SnippetCreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SnippetResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl From<Snippet> for SnippetResponse {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title,
            content: snippet.content,
            created: snippet.created,
            expires: snippet.expires,
        }
    }
}
