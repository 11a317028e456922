//! Schedule Assignment Repository
//!
//! The partial unique index on `(store_id, member_id, date) WHERE status =
//! 'ASSIGNED'` turns a lost check-then-insert race into `RepoError::Duplicate`.

use chrono::NaiveDate;

use super::{RepoError, RepoResult};
use shared::models::{AssignmentDraft, AssignmentStatus, ScheduleAssignment};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, store_id, member_id, work_item_id, date, start_time, end_time, status, notes, created_by, created_at, updated_at";

/// Billable shift row for the paid hours report
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaidShiftRow {
    pub member_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub unpaid_break_min: i32,
}

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
) -> RepoResult<Option<ScheduleAssignment>> {
    let row = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "SELECT {COLUMNS} FROM schedule_assignment WHERE id = ? AND store_id = ?"
    ))
    .bind(id)
    .bind(store_id)
    .fetch_optional(exec)
    .await?;
    Ok(row)
}

/// Assignments in `[from, to]` of any status, optionally for one member
pub async fn find_in_range(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    member_id: Option<i64>,
) -> RepoResult<Vec<ScheduleAssignment>> {
    let rows = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "SELECT {COLUMNS} FROM schedule_assignment \
         WHERE store_id = ?1 AND date >= ?2 AND date <= ?3 AND (?4 IS NULL OR member_id = ?4) \
         ORDER BY date, start_time, id"
    ))
    .bind(store_id)
    .bind(from)
    .bind(to)
    .bind(member_id)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

/// `ASSIGNED` rows in `[from, to]`
#[cfg(test)]
pub async fn find_assigned_in_range(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<ScheduleAssignment>> {
    let rows = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "SELECT {COLUMNS} FROM schedule_assignment \
         WHERE store_id = ? AND date >= ? AND date <= ? AND status = 'ASSIGNED' \
         ORDER BY date, id"
    ))
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

/// `ASSIGNED` rows in `[from, to]` whose work item still exists and whose
/// member is still active
pub async fn find_assigned_with_refs(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<ScheduleAssignment>> {
    let rows = sqlx::query_as::<_, ScheduleAssignment>(
        "SELECT a.id, a.store_id, a.member_id, a.work_item_id, a.date, a.start_time, a.end_time, \
         a.status, a.notes, a.created_by, a.created_at, a.updated_at \
         FROM schedule_assignment a \
         JOIN work_item w ON w.id = a.work_item_id AND w.store_id = a.store_id \
         JOIN store_member m ON m.id = a.member_id AND m.store_id = a.store_id AND m.is_active = 1 \
         WHERE a.store_id = ? AND a.date >= ? AND a.date <= ? AND a.status = 'ASSIGNED' \
         ORDER BY a.date, a.id",
    )
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

/// The `ASSIGNED` row of a member on a date, if any
pub async fn find_assigned_on(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    member_id: i64,
    date: NaiveDate,
) -> RepoResult<Option<ScheduleAssignment>> {
    let row = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "SELECT {COLUMNS} FROM schedule_assignment \
         WHERE store_id = ? AND member_id = ? AND date = ? AND status = 'ASSIGNED'"
    ))
    .bind(store_id)
    .bind(member_id)
    .bind(date)
    .fetch_optional(exec)
    .await?;
    Ok(row)
}

/// Members staffing a work item on a date (`ASSIGNED` or `CONFIRMED`)
pub async fn find_staffed_member_ids(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    work_item_id: i64,
    date: NaiveDate,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT DISTINCT member_id FROM schedule_assignment \
         WHERE store_id = ? AND work_item_id = ? AND date = ? AND status IN ('ASSIGNED', 'CONFIRMED') \
         ORDER BY member_id",
    )
    .bind(store_id)
    .bind(work_item_id)
    .bind(date)
    .fetch_all(exec)
    .await?;
    Ok(ids)
}

/// Billable rows in `[from, to]` with the break of their work item
///
/// A row whose work item is gone is paid without a break.
pub async fn find_billable_in_range(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<PaidShiftRow>> {
    let rows = sqlx::query_as::<_, PaidShiftRow>(
        "SELECT a.member_id, a.start_time, a.end_time, COALESCE(w.unpaid_break_min, 0) AS unpaid_break_min \
         FROM schedule_assignment a \
         LEFT JOIN work_item w ON w.id = a.work_item_id \
         WHERE a.store_id = ? AND a.date >= ? AND a.date <= ? AND a.status IN ('ASSIGNED', 'CONFIRMED') \
         ORDER BY a.member_id, a.date",
    )
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(exec)
    .await?;
    Ok(rows)
}

pub async fn insert(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    draft: &AssignmentDraft,
    created_by: &str,
) -> RepoResult<ScheduleAssignment> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "INSERT INTO schedule_assignment (id, store_id, member_id, work_item_id, date, start_time, end_time, status, notes, created_by, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'ASSIGNED', ?8, ?9, ?10, ?10) RETURNING {COLUMNS}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(draft.member_id)
    .bind(draft.work_item_id)
    .bind(draft.date)
    .bind(&draft.start_time)
    .bind(&draft.end_time)
    .bind(&draft.notes)
    .bind(created_by)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(row)
}

/// Insert every draft on one connection, stop at the first failure
pub async fn insert_many(
    conn: &mut SqliteConnection,
    store_id: i64,
    drafts: &[AssignmentDraft],
    created_by: &str,
) -> RepoResult<usize> {
    for draft in drafts {
        insert(&mut *conn, store_id, draft, created_by).await?;
    }
    Ok(drafts.len())
}

/// Delete every `ASSIGNED` row in `[from, to]`
pub async fn delete_assigned_in_range(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "DELETE FROM schedule_assignment WHERE store_id = ? AND date >= ? AND date <= ? AND status = 'ASSIGNED'",
    )
    .bind(store_id)
    .bind(from)
    .bind(to)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected())
}

/// Delete the `ASSIGNED` row of a member on a date
pub async fn delete_assigned_on(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    member_id: i64,
    date: NaiveDate,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "DELETE FROM schedule_assignment WHERE store_id = ? AND member_id = ? AND date = ? AND status = 'ASSIGNED'",
    )
    .bind(store_id)
    .bind(member_id)
    .bind(date)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected())
}

/// Overwrite status, times and notes; `None` keeps the current value
pub async fn update(
    exec: impl SqliteExecutor<'_>,
    store_id: i64,
    id: i64,
    status: Option<AssignmentStatus>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    notes: Option<&str>,
) -> RepoResult<ScheduleAssignment> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, ScheduleAssignment>(&format!(
        "UPDATE schedule_assignment SET status = COALESCE(?1, status), start_time = COALESCE(?2, start_time), \
         end_time = COALESCE(?3, end_time), notes = COALESCE(?4, notes), updated_at = ?5 \
         WHERE id = ?6 AND store_id = ?7 RETURNING {COLUMNS}"
    ))
    .bind(status)
    .bind(start_time)
    .bind(end_time)
    .bind(notes)
    .bind(now)
    .bind(id)
    .bind(store_id)
    .fetch_optional(exec)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Assignment {id} not found")))
}

pub async fn delete(exec: impl SqliteExecutor<'_>, store_id: i64, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM schedule_assignment WHERE id = ? AND store_id = ?")
        .bind(id)
        .bind(store_id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assignment {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{
        d, insert_member, insert_store, insert_work_item, test_pool,
    };

    fn draft(member_id: i64, work_item_id: i64, date: &str) -> AssignmentDraft {
        AssignmentDraft {
            member_id,
            work_item_id,
            date: d(date),
            start_time: "09:00".into(),
            end_time: "18:00".into(),
            notes: None,
        }
    }

    async fn seed() -> sqlx::SqlitePool {
        let pool = test_pool().await;
        insert_store(&pool, 1).await;
        insert_member(&pool, 1, 100, &[]).await;
        insert_member(&pool, 1, 101, &[]).await;
        insert_work_item(&pool, 1, 500, 540, 1080, &[]).await;
        insert_work_item(&pool, 1, 501, 1080, 1320, &[]).await;
        pool
    }

    #[tokio::test]
    async fn test_one_assigned_row_per_member_and_date() {
        let pool = seed().await;
        let first = insert(&pool, 1, &draft(100, 500, "2024-06-03"), "system")
            .await
            .unwrap();
        assert_eq!(first.status, AssignmentStatus::Assigned);
        assert_eq!(first.created_by.as_deref(), Some("system"));

        let dup = insert(&pool, 1, &draft(100, 501, "2024-06-03"), "system").await;
        assert!(matches!(dup, Err(RepoError::Duplicate(_))));

        // Once confirmed, the slot no longer blocks a new ASSIGNED row
        update(&pool, 1, first.id, Some(AssignmentStatus::Confirmed), None, None, None)
            .await
            .unwrap();
        insert(&pool, 1, &draft(100, 501, "2024-06-03"), "system")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_orphans_and_inactive_members_are_excluded_from_refs() {
        let pool = seed().await;
        insert(&pool, 1, &draft(100, 500, "2024-06-03"), "system")
            .await
            .unwrap();
        // Work item 999 never existed
        insert(&pool, 1, &draft(101, 999, "2024-06-04"), "system")
            .await
            .unwrap();

        let all = find_assigned_in_range(&pool, 1, d("2024-06-03"), d("2024-06-09"))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        let live = find_assigned_with_refs(&pool, 1, d("2024-06-03"), d("2024-06-09"))
            .await
            .unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].work_item_id, 500);

        // A deactivated member counts as gone
        crate::db::repository::member::set_active(&pool, 1, 100, false)
            .await
            .unwrap();
        let live = find_assigned_with_refs(&pool, 1, d("2024-06-03"), d("2024-06-09"))
            .await
            .unwrap();
        assert!(live.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let pool = seed().await;
        let mut d1 = draft(100, 500, "2024-06-03");
        d1.notes = Some("open".into());
        let row = insert(&pool, 1, &d1, "system").await.unwrap();

        let updated = update(&pool, 1, row.id, None, Some("10:00"), None, None)
            .await
            .unwrap();
        assert_eq!(updated.start_time, "10:00");
        assert_eq!(updated.end_time, "18:00");
        assert_eq!(updated.notes.as_deref(), Some("open"));
        assert_eq!(updated.status, AssignmentStatus::Assigned);

        let missing = update(&pool, 2, row.id, None, None, None, None).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_range_delete_only_touches_assigned() {
        let pool = seed().await;
        let a = insert(&pool, 1, &draft(100, 500, "2024-06-03"), "system")
            .await
            .unwrap();
        insert(&pool, 1, &draft(101, 500, "2024-06-04"), "system")
            .await
            .unwrap();
        insert(&pool, 1, &draft(101, 500, "2024-06-10"), "system")
            .await
            .unwrap();
        update(&pool, 1, a.id, Some(AssignmentStatus::Cancelled), None, None, None)
            .await
            .unwrap();

        let deleted = delete_assigned_in_range(&pool, 1, d("2024-06-03"), d("2024-06-09"))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        let left = find_in_range(&pool, 1, d("2024-06-01"), d("2024-06-30"), None)
            .await
            .unwrap();
        assert_eq!(left.len(), 2);
    }

    #[tokio::test]
    async fn test_billable_rows_carry_break() {
        let pool = seed().await;
        sqlx::query("UPDATE work_item SET unpaid_break_min = 60 WHERE id = 500")
            .execute(&pool)
            .await
            .unwrap();
        let a = insert(&pool, 1, &draft(100, 500, "2024-06-03"), "system")
            .await
            .unwrap();
        insert(&pool, 1, &draft(101, 999, "2024-06-03"), "system")
            .await
            .unwrap();
        let c = insert(&pool, 1, &draft(100, 501, "2024-06-04"), "system")
            .await
            .unwrap();
        update(&pool, 1, c.id, Some(AssignmentStatus::Cancelled), None, None, None)
            .await
            .unwrap();
        update(&pool, 1, a.id, Some(AssignmentStatus::Confirmed), None, None, None)
            .await
            .unwrap();

        let rows = find_billable_in_range(&pool, 1, d("2024-06-03"), d("2024-06-09"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].member_id, 100);
        assert_eq!(rows[0].unpaid_break_min, 60);
        assert_eq!(rows[1].unpaid_break_min, 0);

        assert_eq!(
            find_staffed_member_ids(&pool, 1, 500, d("2024-06-03")).await.unwrap(),
            vec![100]
        );
    }
}
