//! End-to-end scheduling flows on an in-memory database

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use roster_server::ScheduleService;
use roster_server::db::DbService;
use roster_server::db::repository::{job_role, member, store, work_item};
use roster_server::scheduling::StoreLocks;
use shared::models::{
    AssignmentCreate, AutoAssignRequest, AvailabilityCreate, CopyWeekRequest, JobRoleCreate,
    MemberCreate, RequiredRoleInput, WeekCopyResult, WorkItemCreate,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

struct Fixture {
    svc: ScheduleService,
    store_id: i64,
}

impl Fixture {
    async fn new() -> Self {
        let db = DbService::in_memory().await.unwrap();
        let store = store::create(&db.pool, "Corner Café").await.unwrap();
        Self {
            svc: ScheduleService::new(db.pool, StoreLocks::new()),
            store_id: store.id,
        }
    }

    async fn role(&self, code: &str) -> i64 {
        job_role::create(
            self.svc.pool(),
            self.store_id,
            JobRoleCreate {
                code: code.into(),
                name: code.into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn member(&self, name: &str, roles: &[i64]) -> i64 {
        let mut conn = self.svc.pool().acquire().await.unwrap();
        member::create(
            &mut conn,
            self.store_id,
            MemberCreate {
                name: name.into(),
                user_id: None,
                job_role_ids: roles.to_vec(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn work_item(&self, name: &str, start_min: i32, end_min: i32, roles: &[(i64, i32)]) -> i64 {
        let mut conn = self.svc.pool().acquire().await.unwrap();
        work_item::create(
            &mut conn,
            self.store_id,
            WorkItemCreate {
                name: name.into(),
                start_min,
                end_min,
                unpaid_break_min: 0,
                max_headcount: 1,
                role_hint: None,
                required_roles: roles
                    .iter()
                    .map(|&(job_role_id, min_count)| RequiredRoleInput {
                        job_role_id,
                        min_count,
                    })
                    .collect(),
            },
        )
        .await
        .unwrap()
        .item
        .id
    }

    async fn day_off(&self, member_id: i64, date: &str) {
        self.svc
            .create_availability(
                self.store_id,
                AvailabilityCreate {
                    member_id,
                    date: d(date),
                    reason: None,
                },
            )
            .await
            .unwrap();
    }

    async fn auto_assign(&self, from: &str, to: &str) -> usize {
        self.svc
            .auto_assign(
                self.store_id,
                AutoAssignRequest {
                    date_from: d(from),
                    date_to: d(to),
                    member_id: None,
                    date: None,
                },
                "manager",
            )
            .await
            .unwrap()
            .created_count
    }

    async fn copy_week(&self, source: &str, target: &str) -> WeekCopyResult {
        self.svc
            .copy_week(
                self.store_id,
                CopyWeekRequest {
                    source_week_start: d(source),
                    target_week_start: d(target),
                },
                "manager",
            )
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_unavailable_barista_is_skipped() {
    let fx = Fixture::new().await;
    let barista = fx.role("barista").await;
    let first = fx.member("Ana", &[barista]).await;
    let second = fx.member("Bea", &[barista]).await;
    fx.work_item("Day", 540, 1080, &[(barista, 1)]).await;
    fx.day_off(first, "2024-06-03").await;

    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-03").await, 1);

    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-03"), d("2024-06-03"), None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].member_id, second);
}

#[tokio::test]
async fn test_rerun_on_full_week_creates_nothing() {
    let fx = Fixture::new().await;
    fx.member("Ana", &[]).await;
    fx.member("Bea", &[]).await;
    fx.member("Cid", &[]).await;
    fx.work_item("Open", 420, 900, &[]).await;
    fx.work_item("Close", 900, 1380, &[]).await;

    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-09").await, 14);
    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-09").await, 0);
}

#[tokio::test]
async fn test_no_member_is_double_booked() {
    let fx = Fixture::new().await;
    fx.member("Ana", &[]).await;
    fx.member("Bea", &[]).await;
    for name in ["A", "B", "C", "D"] {
        fx.work_item(name, 540, 1080, &[]).await;
    }

    let created = fx.auto_assign("2024-06-03", "2024-06-16").await;
    assert_eq!(created, 28);

    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-03"), d("2024-06-16"), None)
        .await
        .unwrap();
    let mut seen = HashSet::new();
    for row in &rows {
        assert!(
            seen.insert((row.member_id, row.date)),
            "member {} booked twice on {}",
            row.member_id,
            row.date
        );
    }
}

#[tokio::test]
async fn test_any_required_role_qualifies() {
    let fx = Fixture::new().await;
    let barista = fx.role("barista").await;
    let cashier = fx.role("cashier").await;
    let only_barista = fx.member("Ana", &[barista]).await;
    fx.work_item("Counter", 540, 1080, &[(barista, 1), (cashier, 1)]).await;

    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-03").await, 1);
    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-03"), d("2024-06-03"), None)
        .await
        .unwrap();
    assert_eq!(rows[0].member_id, only_barista);
}

#[tokio::test]
async fn test_members_without_required_role_are_not_picked() {
    let fx = Fixture::new().await;
    let barista = fx.role("barista").await;
    fx.member("Ana", &[]).await;
    fx.work_item("Bar", 540, 1080, &[(barista, 1)]).await;

    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-09").await, 0);
}

#[tokio::test]
async fn test_week_copy_across_year_boundary() {
    let fx = Fixture::new().await;
    let ana = fx.member("Ana", &[]).await;
    let item = fx.work_item("Day", 540, 1080, &[]).await;

    // Mon, Wed, Sun of the week starting 2024-12-23
    for date in ["2024-12-23", "2024-12-25", "2024-12-29"] {
        fx.svc
            .manual_assign(
                fx.store_id,
                AssignmentCreate {
                    member_id: ana,
                    work_item_id: item,
                    date: d(date),
                    start_time: None,
                    end_time: None,
                    notes: Some("holiday".into()),
                    enforce_coverage: false,
                },
                "manager",
            )
            .await
            .unwrap();
    }

    let result = fx.copy_week("2024-12-23", "2024-12-30").await;
    assert_eq!(result.copied_count(), 3);
    assert_eq!(result.deleted_count(), 0);

    let copied = fx
        .svc
        .list_assignments(fx.store_id, d("2024-12-30"), d("2025-01-05"), None)
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = copied.iter().map(|a| a.date).collect();
    assert_eq!(dates, vec![d("2024-12-30"), d("2025-01-01"), d("2025-01-05")]);
    for (src, dst) in ["2024-12-23", "2024-12-25", "2024-12-29"].iter().zip(&copied) {
        assert_eq!(d(src).weekday(), dst.date.weekday());
        assert_eq!(dst.notes.as_deref(), Some("holiday"));
        assert_eq!(dst.start_time, "09:00");
    }
}

#[tokio::test]
async fn test_week_copy_onto_itself_keeps_data() {
    let fx = Fixture::new().await;
    fx.member("Ana", &[]).await;
    fx.work_item("Day", 540, 1080, &[]).await;
    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-09").await, 7);

    let result = fx.copy_week("2024-06-03", "2024-06-03").await;
    assert_eq!(result, WeekCopyResult::SameWeek { source_count: 7 });
    assert_eq!(result.deleted_count(), 0);

    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-03"), d("2024-06-09"), None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 7);
}

#[tokio::test]
async fn test_week_copy_is_a_full_replacement() {
    let fx = Fixture::new().await;
    fx.member("Ana", &[]).await;
    fx.member("Bea", &[]).await;
    fx.work_item("Day", 540, 1080, &[]).await;
    fx.work_item("Night", 1080, 1440, &[]).await;

    // Target week fully staffed, source week only on Monday
    assert_eq!(fx.auto_assign("2024-06-10", "2024-06-16").await, 14);
    assert_eq!(fx.auto_assign("2024-06-03", "2024-06-03").await, 2);

    let result = fx.copy_week("2024-06-03", "2024-06-10").await;
    assert_eq!(
        result,
        WeekCopyResult::Copied {
            copied_count: 2,
            deleted_count: 14
        }
    );
    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-10"), d("2024-06-16"), None)
        .await
        .unwrap();
    assert!(rows.iter().all(|a| a.date == d("2024-06-10")));
}

#[tokio::test]
async fn test_concurrent_auto_assign_never_double_books() {
    let fx = Fixture::new().await;
    fx.member("Ana", &[]).await;
    fx.member("Bea", &[]).await;
    fx.work_item("A", 540, 1080, &[]).await;
    fx.work_item("B", 540, 1080, &[]).await;
    fx.work_item("C", 540, 1080, &[]).await;

    let req = || AutoAssignRequest {
        date_from: d("2024-06-03"),
        date_to: d("2024-06-09"),
        member_id: None,
        date: None,
    };
    let (a, b) = tokio::join!(
        fx.svc.auto_assign(fx.store_id, req(), "one"),
        fx.svc.auto_assign(fx.store_id, req(), "two"),
    );
    let total = a.unwrap().created_count + b.unwrap().created_count;
    assert_eq!(total, 14);

    let rows = fx
        .svc
        .list_assignments(fx.store_id, d("2024-06-03"), d("2024-06-09"), None)
        .await
        .unwrap();
    let unique: HashSet<_> = rows.iter().map(|a| (a.member_id, a.date)).collect();
    assert_eq!(unique.len(), rows.len());
}
