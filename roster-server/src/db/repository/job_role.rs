//! Job Role Repository

use super::{RepoError, RepoResult};
use shared::models::{JobRole, JobRoleCreate};
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, store_id, code, name, is_active";

/// Every role of a store, deactivated ones included
pub async fn find_all(exec: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<JobRole>> {
    let roles = sqlx::query_as::<_, JobRole>(&format!(
        "SELECT {COLUMNS} FROM store_job_role WHERE store_id = ? ORDER BY id"
    ))
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(roles)
}

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    data: JobRoleCreate,
) -> RepoResult<JobRole> {
    let code = data.code.trim().to_lowercase();
    if code.is_empty() {
        return Err(RepoError::Validation("Job role code cannot be empty".into()));
    }
    let role = sqlx::query_as::<_, JobRole>(&format!(
        "INSERT INTO store_job_role (id, store_id, code, name, is_active) VALUES (?1, ?2, ?3, ?4, 1) RETURNING {COLUMNS}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(&code)
    .bind(data.name.trim())
    .fetch_one(exec)
    .await?;
    Ok(role)
}

#[cfg(test)]
pub async fn set_active(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
    is_active: bool,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE store_job_role SET is_active = ? WHERE id = ? AND store_id = ?")
        .bind(is_active)
        .bind(id)
        .bind(store_id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Job role {id} not found")));
    }
    Ok(())
}
