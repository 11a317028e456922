//! Store Member Repository
//!
//! Members and their job role links. The roster order (`created_at`, `id`)
//! is the candidate order of auto-assignment, keep it stable.

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberCreate, MemberJobRole};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, store_id, user_id, name, is_active, created_at";

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
) -> RepoResult<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(&format!(
        "SELECT {COLUMNS} FROM store_member WHERE id = ? AND store_id = ?"
    ))
    .bind(id)
    .bind(store_id)
    .fetch_optional(exec)
    .await?;
    Ok(member)
}

/// Active members in roster order
pub async fn find_active(exec: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>(&format!(
        "SELECT {COLUMNS} FROM store_member WHERE store_id = ? AND is_active = 1 ORDER BY created_at, id"
    ))
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(members)
}

/// All members including inactive ones (reports still name former staff)
pub async fn find_all(exec: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>(&format!(
        "SELECT {COLUMNS} FROM store_member WHERE store_id = ? ORDER BY created_at, id"
    ))
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(members)
}

/// Role links of active members to active roles of the store
pub async fn find_role_links(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Vec<MemberJobRole>> {
    let links = sqlx::query_as::<_, MemberJobRole>(
        "SELECT l.member_id, l.job_role_id FROM store_member_job_role l \
         JOIN store_member m ON m.id = l.member_id \
         JOIN store_job_role r ON r.id = l.job_role_id \
         WHERE m.store_id = ?1 AND r.store_id = ?1 AND m.is_active = 1 AND r.is_active = 1 \
         ORDER BY m.created_at, m.id, r.id",
    )
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(links)
}

/// Create a member and link its job roles
///
/// Every role must belong to the same store.
pub async fn create(
    conn: &mut SqliteConnection,
    store_id: i64,
    data: MemberCreate,
) -> RepoResult<Member> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(RepoError::Validation("Member name cannot be empty".into()));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let member = sqlx::query_as::<_, Member>(&format!(
        "INSERT INTO store_member (id, store_id, user_id, name, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(store_id)
    .bind(data.user_id)
    .bind(name)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    replace_roles(conn, store_id, id, &data.job_role_ids).await?;
    Ok(member)
}

/// Replace the job role set of a member
pub async fn replace_roles(
    conn: &mut SqliteConnection,
    store_id: i64,
    member_id: i64,
    job_role_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM store_member_job_role WHERE member_id = ?")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    for role_id in job_role_ids {
        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM store_job_role WHERE id = ? AND store_id = ?")
                .bind(role_id)
                .bind(store_id)
                .fetch_optional(&mut *conn)
                .await?;
        if owned.is_none() {
            return Err(RepoError::NotFound(format!("Job role {role_id} not found")));
        }
        sqlx::query("INSERT OR IGNORE INTO store_member_job_role (member_id, job_role_id) VALUES (?, ?)")
            .bind(member_id)
            .bind(role_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
pub async fn set_active(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
    is_active: bool,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE store_member SET is_active = ? WHERE id = ? AND store_id = ?")
        .bind(is_active)
        .bind(id)
        .bind(store_id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}
