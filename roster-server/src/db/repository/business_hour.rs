//! Business Hour Repository

use super::RepoResult;
use shared::models::{BusinessHour, BusinessHourInput};
use sqlx::{SqliteConnection, SqliteExecutor};

pub async fn find_all(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Vec<BusinessHour>> {
    let hours = sqlx::query_as::<_, BusinessHour>(
        "SELECT store_id, weekday, open_min, close_min FROM business_hour WHERE store_id = ? ORDER BY weekday",
    )
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(hours)
}

/// Replace the whole week; weekdays absent from `hours` become undefined
pub async fn replace_all(
    conn: &mut SqliteConnection,
    store_id: i64,
    hours: &[BusinessHourInput],
) -> RepoResult<Vec<BusinessHour>> {
    sqlx::query("DELETE FROM business_hour WHERE store_id = ?")
        .bind(store_id)
        .execute(&mut *conn)
        .await?;
    for h in hours {
        sqlx::query(
            "INSERT INTO business_hour (store_id, weekday, open_min, close_min) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(store_id)
        .bind(h.weekday)
        .bind(h.open_min)
        .bind(h.close_min)
        .execute(&mut *conn)
        .await?;
    }
    find_all(&mut *conn, store_id).await
}
