//! User Availability Repository

use chrono::NaiveDate;

use super::{RepoError, RepoResult};
use shared::models::{AvailabilityCreate, UserAvailability};
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, store_id, member_id, date, reason, created_at";

/// Unavailability rows in `[from, to]`, optionally for one member
pub async fn find_in_range(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    member_id: Option<i64>,
) -> RepoResult<Vec<UserAvailability>> {
    let rows = sqlx::query_as::<_, UserAvailability>(&format!(
        "SELECT {COLUMNS} FROM user_availability \
         WHERE store_id = ?1 AND date >= ?2 AND date <= ?3 AND (?4 IS NULL OR member_id = ?4) \
         ORDER BY date, member_id"
    ))
    .bind(store_id)
    .bind(from)
    .bind(to)
    .bind(member_id)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

pub async fn exists_on(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    member_id: i64,
    date: NaiveDate,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM user_availability WHERE store_id = ? AND member_id = ? AND date = ?",
    )
    .bind(store_id)
    .bind(member_id)
    .bind(date)
    .fetch_optional(exec)
    .await?;
    Ok(found.is_some())
}

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    data: &AvailabilityCreate,
) -> RepoResult<UserAvailability> {
    let row = sqlx::query_as::<_, UserAvailability>(&format!(
        "INSERT INTO user_availability (id, store_id, member_id, date, reason, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {COLUMNS}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(data.member_id)
    .bind(data.date)
    .bind(&data.reason)
    .bind(shared::util::now_millis())
    .fetch_one(exec)
    .await?;
    Ok(row)
}

pub async fn delete(exec: impl SqliteExecutor<'_>, store_id: i64, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM user_availability WHERE id = ? AND store_id = ?")
        .bind(id)
        .bind(store_id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Availability {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{d, insert_member, insert_store, test_pool};

    #[tokio::test]
    async fn test_create_list_delete() {
        let pool = test_pool().await;
        insert_store(&pool, 1).await;
        insert_member(&pool, 1, 100, &[]).await;
        insert_member(&pool, 1, 101, &[]).await;

        let data = AvailabilityCreate {
            member_id: 100,
            date: d("2024-06-03"),
            reason: Some("dentist".into()),
        };
        let row = create(&pool, 1, &data).await.unwrap();
        assert_eq!(row.date, d("2024-06-03"));
        assert!(matches!(create(&pool, 1, &data).await, Err(RepoError::Duplicate(_))));

        create(
            &pool,
            1,
            &AvailabilityCreate {
                member_id: 101,
                date: d("2024-06-09"),
                reason: None,
            },
        )
        .await
        .unwrap();

        let week = find_in_range(&pool, 1, d("2024-06-03"), d("2024-06-09"), None)
            .await
            .unwrap();
        assert_eq!(week.len(), 2);
        let one = find_in_range(&pool, 1, d("2024-06-03"), d("2024-06-09"), Some(101))
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert!(exists_on(&pool, 1, 100, d("2024-06-03")).await.unwrap());
        assert!(!exists_on(&pool, 1, 100, d("2024-06-04")).await.unwrap());

        delete(&pool, 1, row.id).await.unwrap();
        assert!(matches!(delete(&pool, 1, row.id).await, Err(RepoError::NotFound(_))));
    }
}
