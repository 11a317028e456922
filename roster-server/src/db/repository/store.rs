//! Store Repository

use super::{RepoError, RepoResult};
use shared::models::Store;
use sqlx::SqliteExecutor;

pub async fn find_by_id(exec: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Store>> {
    let store = sqlx::query_as::<_, Store>(
        "SELECT id, name, archived_at, created_at FROM store WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(exec)
    .await?;
    Ok(store)
}

pub async fn create(exec: impl SqliteExecutor<'_>, name: &str) -> RepoResult<Store> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let store = sqlx::query_as::<_, Store>(
        "INSERT INTO store (id, name, archived_at, created_at) VALUES (?1, ?2, NULL, ?3) RETURNING id, name, archived_at, created_at",
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(store)
}

/// Soft delete: the store and everything it owns stays readable
pub async fn archive(exec: impl SqliteExecutor<'_>, id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE store SET archived_at = ? WHERE id = ? AND archived_at IS NULL")
        .bind(now)
        .bind(id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Store {id} not found or already archived"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_archive() {
        let pool = test_pool().await;
        let store = create(&pool, "Central").await.unwrap();
        assert!(!store.is_archived());

        archive(&pool, store.id).await.unwrap();
        let found = find_by_id(&pool, store.id).await.unwrap().unwrap();
        assert!(found.is_archived());

        // Archiving twice is reported, not silently ignored
        assert!(matches!(
            archive(&pool, store.id).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
