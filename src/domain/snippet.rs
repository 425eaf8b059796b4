use chrono::{DateTime, Utc};

/// A stored snippet. Expired rows stay on disk but are logically deleted:
/// the repository read path only ever returns rows whose `expires` is
/// strictly in the future.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}
