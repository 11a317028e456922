//! Work Item Repository

use super::{RepoError, RepoResult, placeholders};
use shared::models::{WorkItem, WorkItemCreate, WorkItemDetail, WorkItemRequiredRole};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str =
    "id, store_id, name, start_min, end_min, unpaid_break_min, max_headcount, role_hint, created_at";

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
) -> RepoResult<Option<WorkItem>> {
    let item = sqlx::query_as::<_, WorkItem>(&format!(
        "SELECT {COLUMNS} FROM work_item WHERE id = ? AND store_id = ?"
    ))
    .bind(id)
    .bind(store_id)
    .fetch_optional(exec)
    .await?;
    Ok(item)
}

/// All work items of a store in creation order
pub async fn find_all(exec: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<WorkItem>> {
    let items = sqlx::query_as::<_, WorkItem>(&format!(
        "SELECT {COLUMNS} FROM work_item WHERE store_id = ? ORDER BY created_at, id"
    ))
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(items)
}

/// Role requirements of every work item of a store
///
/// Rows on deactivated roles are kept: the item stays constrained to them.
pub async fn find_required_roles(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Vec<WorkItemRequiredRole>> {
    let rows = sqlx::query_as::<_, WorkItemRequiredRole>(
        "SELECT rr.work_item_id, rr.job_role_id, rr.min_count FROM work_item_required_role rr \
         JOIN work_item w ON w.id = rr.work_item_id \
         JOIN store_job_role r ON r.id = rr.job_role_id \
         WHERE w.store_id = ?1 AND r.store_id = ?1 \
         ORDER BY rr.work_item_id, rr.job_role_id",
    )
    .bind(store_id)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

/// Role requirements of the given work items
pub async fn find_required_roles_for(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    work_item_ids: &[i64],
) -> RepoResult<Vec<WorkItemRequiredRole>> {
    if work_item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT rr.work_item_id, rr.job_role_id, rr.min_count FROM work_item_required_role rr \
         JOIN work_item w ON w.id = rr.work_item_id \
         JOIN store_job_role r ON r.id = rr.job_role_id \
         WHERE w.store_id = ? AND r.store_id = w.store_id \
         AND rr.work_item_id IN ({}) ORDER BY rr.work_item_id, rr.job_role_id",
        placeholders(work_item_ids.len())
    );
    let mut query = sqlx::query_as::<_, WorkItemRequiredRole>(&sql).bind(store_id);
    for id in work_item_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(exec).await?)
}

/// Create a work item with its role requirements
///
/// Time bounds are checked by the caller; the table CHECKs are the backstop.
pub async fn create(
    conn: &mut SqliteConnection,
    store_id: i64,
    data: WorkItemCreate,
) -> RepoResult<WorkItemDetail> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let item = sqlx::query_as::<_, WorkItem>(&format!(
        "INSERT INTO work_item (id, store_id, name, start_min, end_min, unpaid_break_min, max_headcount, role_hint, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(store_id)
    .bind(data.name.trim())
    .bind(data.start_min)
    .bind(data.end_min)
    .bind(data.unpaid_break_min)
    .bind(data.max_headcount)
    .bind(&data.role_hint)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    let mut required_roles = Vec::with_capacity(data.required_roles.len());
    for req in &data.required_roles {
        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM store_job_role WHERE id = ? AND store_id = ?")
                .bind(req.job_role_id)
                .bind(store_id)
                .fetch_optional(&mut *conn)
                .await?;
        if owned.is_none() {
            return Err(RepoError::NotFound(format!(
                "Job role {} not found",
                req.job_role_id
            )));
        }
        let row = sqlx::query_as::<_, WorkItemRequiredRole>(
            "INSERT INTO work_item_required_role (work_item_id, job_role_id, min_count) VALUES (?1, ?2, ?3) \
             RETURNING work_item_id, job_role_id, min_count",
        )
        .bind(id)
        .bind(req.job_role_id)
        .bind(req.min_count)
        .fetch_one(&mut *conn)
        .await?;
        required_roles.push(row);
    }

    Ok(WorkItemDetail {
        item,
        required_roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{insert_role, insert_store, insert_work_item, test_pool};
    use shared::models::RequiredRoleInput;

    fn opening(required_roles: Vec<RequiredRoleInput>) -> WorkItemCreate {
        WorkItemCreate {
            name: "Opening".into(),
            start_min: 540,
            end_min: 1080,
            unpaid_break_min: 60,
            max_headcount: 2,
            role_hint: None,
            required_roles,
        }
    }

    #[tokio::test]
    async fn test_create_with_required_roles() {
        let pool = test_pool().await;
        insert_store(&pool, 1).await;
        insert_role(&pool, 1, 10, "barista").await;

        let mut conn = pool.acquire().await.unwrap();
        let detail = create(
            &mut conn,
            1,
            opening(vec![RequiredRoleInput {
                job_role_id: 10,
                min_count: 2,
            }]),
        )
        .await
        .unwrap();
        drop(conn);

        assert_eq!(detail.item.start_min, 540);
        assert_eq!(detail.required_roles.len(), 1);
        assert_eq!(detail.required_roles[0].min_count, 2);

        let all = find_required_roles(&pool, 1).await.unwrap();
        assert_eq!(all, detail.required_roles);
    }

    #[tokio::test]
    async fn test_check_constraints_reject_bad_windows() {
        let pool = test_pool().await;
        insert_store(&pool, 1).await;
        let mut conn = pool.acquire().await.unwrap();

        let mut reversed = opening(vec![]);
        reversed.start_min = 1080;
        reversed.end_min = 540;
        assert!(matches!(
            create(&mut conn, 1, reversed).await,
            Err(RepoError::Validation(_))
        ));

        let mut long_break = opening(vec![]);
        long_break.unpaid_break_min = 600;
        assert!(matches!(
            create(&mut conn, 1, long_break).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_required_roles_keep_inactive_and_scope() {
        let pool = test_pool().await;
        insert_store(&pool, 1).await;
        insert_role(&pool, 1, 10, "barista").await;
        insert_role(&pool, 1, 11, "cashier").await;
        insert_work_item(&pool, 1, 500, 540, 1080, &[(10, 1), (11, 1)]).await;
        insert_work_item(&pool, 1, 501, 600, 900, &[(10, 2)]).await;

        sqlx::query("UPDATE store_job_role SET is_active = 0 WHERE id = 11")
            .execute(&pool)
            .await
            .unwrap();

        let rows = find_required_roles_for(&pool, 1, &[500]).await.unwrap();
        let role_ids: Vec<i64> = rows.iter().map(|r| r.job_role_id).collect();
        assert_eq!(role_ids, vec![10, 11]);
        assert_eq!(find_required_roles(&pool, 1).await.unwrap().len(), 3);

        assert!(find_required_roles_for(&pool, 1, &[]).await.unwrap().is_empty());
        assert!(find_required_roles_for(&pool, 2, &[500]).await.unwrap().is_empty());
        assert_eq!(find_all(&pool, 1).await.unwrap().len(), 2);
    }
}
