#![cfg(test)]

use snipbin_backend::repository::{PgSnippetRepository, RepositoryError, SnippetRepository};

#[sqlx::test(migrations = "tests/migrations")]
async fn insert_then_get_returns_snippet(pool: sqlx::PgPool) {
    let repo = PgSnippetRepository::new(pool);

    let id = repo
        .insert("An old silent pond", "A frog jumps into the pond", 7)
        .await
        .expect("insert");

    let snippet = repo.get(id).await.expect("get");
    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "An old silent pond");
    assert!(snippet.expires > snippet.created);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn expired_snippet_collapses_to_not_found(pool: sqlx::PgPool) {
    let repo = PgSnippetRepository::new(pool.clone());

    let id = repo
        .insert("Ephemeral", "Gone soon", 7)
        .await
        .expect("insert");

    // simulate elapsed time by forcing the stored expiry into the past
    sqlx::query("UPDATE snippets SET expires = now() - interval '1 day' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .expect("force expiry");

    let result = repo.get(id).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[sqlx::test(migrations = "tests/migrations")]
async fn never_existed_snippet_is_not_found(pool: sqlx::PgPool) {
    let repo = PgSnippetRepository::new(pool);
    let result = repo.get(4242).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[sqlx::test(migrations = "tests/migrations")]
async fn latest_caps_at_ten_and_skips_expired(pool: sqlx::PgPool) {
    let repo = PgSnippetRepository::new(pool.clone());

    for i in 0..12 {
        repo.insert(&format!("snippet {i}"), "content", 7)
            .await
            .expect("insert");
    }
    let expired = repo.insert("expired", "content", 7).await.expect("insert");
    sqlx::query("UPDATE snippets SET expires = now() - interval '1 hour' WHERE id = $1")
        .bind(expired)
        .execute(&pool)
        .await
        .expect("force expiry");

    let latest = repo.latest().await.expect("latest");
    assert_eq!(latest.len(), 10);
    assert!(latest.iter().all(|s| s.title != "expired"));
    // newest first
    assert!(latest.windows(2).all(|pair| pair[0].created >= pair[1].created));
}
