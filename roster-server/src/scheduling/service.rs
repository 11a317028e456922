//! Schedule Service
//!
//! Load → compute → persist for every scheduling action. Writers that check
//! before they write hold the store lock and run in one transaction.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::models::{
    AssignmentCreate, AssignmentDraft, AssignmentUpdate, AutoAssignRequest, AutoAssignResponse,
    AvailabilityCreate, BusinessHour, BusinessHourInput, CopyWeekRequest, CoverageReport, Member,
    PaidHoursQuery, PaidHoursSummary, ScheduleAssignment, UserAvailability, ValidateCoverageRequest,
    WeekCopyResult, WorkItem, WorkItemCreate, WorkItemDetail, WorkItemRequiredRole,
};
use sqlx::{SqliteConnection, SqlitePool};

use super::auto_assign::{AutoAssignPlan, plan_auto_assign};
use super::candidate_pool::CandidatePool;
use super::coverage::evaluate_coverage;
use super::locks::StoreLocks;
use super::paid_minutes::{paid_minutes, summarize};
use super::week_copy::plan_week_copy;
use crate::db::repository::{
    RepoError, assignment, availability, business_hour, job_role, member, store, work_item,
};
use crate::utils::time::{
    MINUTES_PER_DAY, dates_inclusive, minutes_to_hhmm, normalize_close_min, parse_hhmm,
    require_week_start, week_bounds,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
    validate_work_window,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Operator stamp used when the caller does not identify itself
pub const SYSTEM_OPERATOR: &str = "system";

/// `RepoError::NotFound` → `code`, everything else unchanged
fn not_found_as(code: ErrorCode) -> impl Fn(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound(msg) => AppError::with_message(code, msg),
        other => other.into(),
    }
}

/// Lost the race on the one-ASSIGNED-row-per-day index
fn duplicate_as_assigned(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::MemberAlreadyAssigned),
        other => other.into(),
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleService {
    pool: SqlitePool,
    locks: StoreLocks,
}

impl ScheduleService {
    pub fn new(pool: SqlitePool, locks: StoreLocks) -> Self {
        Self { pool, locks }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==================== Guards ====================

    async fn ensure_store(conn: &mut SqliteConnection, store_id: i64, write: bool) -> AppResult<()> {
        let store = store::find_by_id(&mut *conn, store_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::StoreNotFound, format!("Store {store_id} not found"))
            })?;
        if write && store.is_archived() {
            return Err(AppError::with_message(
                ErrorCode::StoreArchived,
                format!("Store {store_id} is archived"),
            ));
        }
        Ok(())
    }

    async fn active_member(
        conn: &mut SqliteConnection,
        store_id: i64,
        member_id: i64,
    ) -> AppResult<Member> {
        let member = member::find_by_id(&mut *conn, store_id, member_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::MemberNotFound, format!("Member {member_id} not found"))
            })?;
        if !member.is_active {
            return Err(AppError::with_message(
                ErrorCode::MemberInactive,
                format!("Member {member_id} is inactive"),
            ));
        }
        Ok(member)
    }

    async fn existing_work_item(
        conn: &mut SqliteConnection,
        store_id: i64,
        work_item_id: i64,
    ) -> AppResult<WorkItem> {
        work_item::find_by_id(&mut *conn, store_id, work_item_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::WorkItemNotFound,
                    format!("Work item {work_item_id} not found"),
                )
            })
    }

    // ==================== Core operations ====================

    /// Fill open (work item, date) slots first-fit
    ///
    /// With `date` set only that date is scheduled, with `member_id` set
    /// only that member is considered. Slots that already hold an assignment
    /// are left alone, so re-running on a full range creates nothing.
    pub async fn auto_assign(
        &self,
        store_id: i64,
        req: AutoAssignRequest,
        operator: &str,
    ) -> AppResult<AutoAssignResponse> {
        let range = dates_inclusive(req.date_from, req.date_to)?;
        let dates = match req.date {
            Some(date) if date < req.date_from || date > req.date_to => {
                return Err(AppError::invalid_date_range(format!(
                    "date {date} is outside {} .. {}",
                    req.date_from, req.date_to
                )));
            }
            Some(date) => vec![date],
            None => range,
        };
        let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
            return Ok(AutoAssignResponse { created_count: 0 });
        };

        let _guard = self.locks.lock(store_id).await;
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;
        if let Some(member_id) = req.member_id {
            Self::active_member(&mut tx, store_id, member_id).await?;
        }

        let members = member::find_active(&mut *tx, store_id).await?;
        let links = member::find_role_links(&mut *tx, store_id).await?;
        let work_items = work_item::find_all(&mut *tx, store_id).await?;
        let required_roles = work_item::find_required_roles(&mut *tx, store_id).await?;
        let business_hours = business_hour::find_all(&mut *tx, store_id).await?;
        let unavailable = availability::find_in_range(&mut *tx, store_id, first, last, None).await?;
        let existing: Vec<ScheduleAssignment> =
            assignment::find_in_range(&mut *tx, store_id, first, last, None)
                .await?
                .into_iter()
                .filter(|a| a.status.is_billable())
                .collect();

        let filled_slots: HashSet<(i64, NaiveDate)> =
            existing.iter().map(|a| (a.work_item_id, a.date)).collect();
        let mut pool = CandidatePool::new(
            &members,
            &links,
            unavailable.iter().map(|u| (u.member_id, u.date)),
            existing.iter().map(|a| (a.member_id, a.date)),
            req.member_id,
        );
        let plan = AutoAssignPlan {
            dates: &dates,
            work_items: &work_items,
            required_roles: &required_roles,
            business_hours: &business_hours,
            filled_slots: &filled_slots,
        };
        let drafts = plan_auto_assign(&plan, &mut pool);

        let created_count = assignment::insert_many(&mut tx, store_id, &drafts, operator)
            .await
            .map_err(duplicate_as_assigned)?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            store_id,
            from = %first,
            to = %last,
            member_id = ?req.member_id,
            created = created_count,
            "Auto-assign completed"
        );
        Ok(AutoAssignResponse { created_count })
    }

    /// Check role minimums of `work_item_ids` against the proposed members
    pub async fn validate_coverage(
        &self,
        store_id: i64,
        req: ValidateCoverageRequest,
    ) -> AppResult<CoverageReport> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut conn, store_id, false).await?;
        for &id in &req.work_item_ids {
            Self::existing_work_item(&mut conn, store_id, id).await?;
        }

        let requirements =
            work_item::find_required_roles_for(&mut *conn, store_id, &req.work_item_ids).await?;
        let roles = job_role::find_all(&mut *conn, store_id).await?;
        let links = member::find_role_links(&mut *conn, store_id).await?;
        Ok(evaluate_coverage(
            &requirements,
            &roles,
            &links,
            &req.assigned_member_ids,
        ))
    }

    /// Replace the target week's `ASSIGNED` rows with the source week's
    ///
    /// Delete and insert share one transaction: a failed insert rolls the
    /// delete back and is reported as `WeekCopyFailed`. Copies landing on a
    /// member's declared day off are skipped.
    pub async fn copy_week(
        &self,
        store_id: i64,
        req: CopyWeekRequest,
        operator: &str,
    ) -> AppResult<WeekCopyResult> {
        let source_start = require_week_start(req.source_week_start)?;
        let target_start = require_week_start(req.target_week_start)?;
        let (source_from, source_to) = week_bounds(source_start);
        let (target_from, target_to) = week_bounds(target_start);

        let _guard = self.locks.lock(store_id).await;
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;

        let source =
            assignment::find_assigned_with_refs(&mut *tx, store_id, source_from, source_to).await?;
        if source_start == target_start {
            tracing::info!(store_id, week = %source_start, "Week copy onto itself skipped");
            return Ok(WeekCopyResult::SameWeek {
                source_count: source.len(),
            });
        }

        let deleted_count =
            assignment::delete_assigned_in_range(&mut *tx, store_id, target_from, target_to).await?
                as usize;

        let days_off: HashSet<(i64, NaiveDate)> =
            availability::find_in_range(&mut *tx, store_id, target_from, target_to, None)
                .await?
                .into_iter()
                .map(|u| (u.member_id, u.date))
                .collect();
        let drafts: Vec<AssignmentDraft> = plan_week_copy(&source, source_start, target_start)
            .into_iter()
            .filter(|d| {
                let off = days_off.contains(&(d.member_id, d.date));
                if off {
                    tracing::debug!(member_id = d.member_id, date = %d.date, "Copy skipped, member unavailable");
                }
                !off
            })
            .collect();

        if drafts.is_empty() {
            tx.commit().await.map_err(RepoError::from)?;
            tracing::info!(store_id, deleted = deleted_count, "Week copy found nothing to copy");
            return Ok(WeekCopyResult::NothingToCopy { deleted_count });
        }

        let copied_count = match assignment::insert_many(&mut tx, store_id, &drafts, operator).await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(store_id, source = %source_start, target = %target_start, error = %e, "Week copy insert failed");
                return Err(AppError::with_message(
                    ErrorCode::WeekCopyFailed,
                    format!("Week copy failed, target week left unchanged: {e}"),
                )
                .with_detail("target_week_start", target_start.to_string()));
            }
        };
        tx.commit().await.map_err(|e| {
            AppError::with_message(ErrorCode::WeekCopyFailed, format!("Week copy commit failed: {e}"))
        })?;

        tracing::info!(
            store_id,
            source = %source_start,
            target = %target_start,
            copied = copied_count,
            deleted = deleted_count,
            "Week copy completed"
        );
        Ok(WeekCopyResult::Copied {
            copied_count,
            deleted_count,
        })
    }

    /// Paid minutes per member over `[date_from, date_to]`
    pub async fn paid_hours(
        &self,
        store_id: i64,
        query: PaidHoursQuery,
    ) -> AppResult<Vec<PaidHoursSummary>> {
        dates_inclusive(query.date_from, query.date_to)?;
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut conn, store_id, false).await?;

        let rows =
            assignment::find_billable_in_range(&mut *conn, store_id, query.date_from, query.date_to)
                .await?;
        let members = member::find_all(&mut *conn, store_id).await?;

        let mut shifts = Vec::with_capacity(rows.len());
        for row in rows {
            match paid_minutes(&row.start_time, &row.end_time, row.unpaid_break_min) {
                Ok(minutes) => shifts.push((row.member_id, minutes)),
                Err(e) => {
                    tracing::warn!(member_id = row.member_id, error = %e, "Unreadable shift times skipped")
                }
            }
        }
        Ok(summarize(shifts, &members))
    }

    // ==================== Assignments ====================

    /// Put one member on one work item for one date
    ///
    /// An existing `ASSIGNED` row of the member on that date is replaced.
    pub async fn manual_assign(
        &self,
        store_id: i64,
        data: AssignmentCreate,
        operator: &str,
    ) -> AppResult<ScheduleAssignment> {
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

        let _guard = self.locks.lock(store_id).await;
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;
        Self::active_member(&mut tx, store_id, data.member_id).await?;
        let item = Self::existing_work_item(&mut tx, store_id, data.work_item_id).await?;

        let start_time = match data.start_time {
            Some(t) => minutes_to_hhmm(parse_hhmm(&t)?),
            None => minutes_to_hhmm(item.start_min),
        };
        let end_time = match data.end_time {
            Some(t) => minutes_to_hhmm(parse_hhmm(&t)?),
            None => minutes_to_hhmm(item.end_min),
        };

        if availability::exists_on(&mut *tx, store_id, data.member_id, data.date).await? {
            return Err(AppError::with_message(
                ErrorCode::MemberUnavailable,
                format!("Member {} is unavailable on {}", data.member_id, data.date),
            ));
        }

        let replaced =
            assignment::delete_assigned_on(&mut *tx, store_id, data.member_id, data.date).await?;
        let draft = AssignmentDraft {
            member_id: data.member_id,
            work_item_id: data.work_item_id,
            date: data.date,
            start_time,
            end_time,
            notes: data.notes,
        };
        let created = assignment::insert(&mut *tx, store_id, &draft, operator)
            .await
            .map_err(duplicate_as_assigned)?;

        if data.enforce_coverage {
            let staffed =
                assignment::find_staffed_member_ids(&mut *tx, store_id, item.id, data.date).await?;
            let requirements =
                work_item::find_required_roles_for(&mut *tx, store_id, &[item.id]).await?;
            let roles = job_role::find_all(&mut *tx, store_id).await?;
            let links = member::find_role_links(&mut *tx, store_id).await?;
            let report = evaluate_coverage(&requirements, &roles, &links, &staffed);
            if !report.is_valid {
                let details = serde_json::to_value(&report.insufficient_roles)
                    .map_err(|e| AppError::internal(e.to_string()))?;
                return Err(AppError::with_message(
                    ErrorCode::InsufficientRoleCoverage,
                    report.message,
                )
                .with_detail("insufficient_roles", details));
            }
        }

        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(
            store_id,
            assignment_id = created.id,
            member_id = created.member_id,
            date = %created.date,
            replaced,
            "Assignment created"
        );
        Ok(created)
    }

    /// Status transition, time edit or notes
    pub async fn update_assignment(
        &self,
        store_id: i64,
        id: i64,
        data: AssignmentUpdate,
    ) -> AppResult<ScheduleAssignment> {
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        let start_time = data
            .start_time
            .as_deref()
            .map(|t| parse_hhmm(t).map(minutes_to_hhmm))
            .transpose()?;
        let end_time = data
            .end_time
            .as_deref()
            .map(|t| parse_hhmm(t).map(minutes_to_hhmm))
            .transpose()?;

        let current = assignment::find_by_id(&self.pool, store_id, id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::AssignmentNotFound, format!("Assignment {id} not found"))
            })?;
        if let Some(next) = data.status
            && !current.status.can_transition_to(next)
        {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move assignment {id} from {} to {next}", current.status),
            ));
        }

        let updated = assignment::update(
            &self.pool,
            store_id,
            id,
            data.status,
            start_time.as_deref(),
            end_time.as_deref(),
            data.notes.as_deref(),
        )
        .await
        .map_err(not_found_as(ErrorCode::AssignmentNotFound))?;
        tracing::info!(store_id, assignment_id = id, status = %updated.status, "Assignment updated");
        Ok(updated)
    }

    pub async fn delete_assignment(&self, store_id: i64, id: i64) -> AppResult<()> {
        assignment::delete(&self.pool, store_id, id)
            .await
            .map_err(not_found_as(ErrorCode::AssignmentNotFound))?;
        tracing::info!(store_id, assignment_id = id, "Assignment deleted");
        Ok(())
    }

    pub async fn list_assignments(
        &self,
        store_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
        member_id: Option<i64>,
    ) -> AppResult<Vec<ScheduleAssignment>> {
        dates_inclusive(date_from, date_to)?;
        Ok(assignment::find_in_range(&self.pool, store_id, date_from, date_to, member_id).await?)
    }

    // ==================== Availability ====================

    /// Declare a day off; refused while the member holds an `ASSIGNED` row
    pub async fn create_availability(
        &self,
        store_id: i64,
        data: AvailabilityCreate,
    ) -> AppResult<UserAvailability> {
        validate_optional_text(&data.reason, "reason", MAX_NOTE_LEN)?;

        let _guard = self.locks.lock(store_id).await;
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;
        Self::active_member(&mut tx, store_id, data.member_id).await?;

        if let Some(existing) =
            assignment::find_assigned_on(&mut *tx, store_id, data.member_id, data.date).await?
        {
            return Err(AppError::with_message(
                ErrorCode::MemberAlreadyAssigned,
                format!("Member {} is assigned on {}", data.member_id, data.date),
            )
            .with_detail("assignment_id", existing.id));
        }

        let created = availability::create(&mut *tx, store_id, &data).await?;
        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(store_id, member_id = data.member_id, date = %data.date, "Availability created");
        Ok(created)
    }

    pub async fn delete_availability(&self, store_id: i64, id: i64) -> AppResult<()> {
        availability::delete(&self.pool, store_id, id)
            .await
            .map_err(not_found_as(ErrorCode::AvailabilityNotFound))?;
        Ok(())
    }

    pub async fn list_availability(
        &self,
        store_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
        member_id: Option<i64>,
    ) -> AppResult<Vec<UserAvailability>> {
        dates_inclusive(date_from, date_to)?;
        Ok(availability::find_in_range(&self.pool, store_id, date_from, date_to, member_id).await?)
    }

    // ==================== Work items & business hours ====================

    pub async fn create_work_item(
        &self,
        store_id: i64,
        data: WorkItemCreate,
    ) -> AppResult<WorkItemDetail> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.role_hint, "role_hint", MAX_SHORT_TEXT_LEN)?;
        validate_work_window(data.start_min, data.end_min, data.unpaid_break_min)?;
        if data.max_headcount < 1 {
            return Err(AppError::validation("max_headcount must be at least 1"));
        }
        if let Some(req) = data.required_roles.iter().find(|r| r.min_count < 0) {
            return Err(AppError::validation(format!(
                "min_count of job role {} must not be negative",
                req.job_role_id
            )));
        }

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;
        let detail = work_item::create(&mut tx, store_id, data)
            .await
            .map_err(not_found_as(ErrorCode::JobRoleNotFound))?;
        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(store_id, work_item_id = detail.item.id, "Work item created");
        Ok(detail)
    }

    pub async fn list_work_items(&self, store_id: i64) -> AppResult<Vec<WorkItemDetail>> {
        let items = work_item::find_all(&self.pool, store_id).await?;
        let mut required: HashMap<i64, Vec<WorkItemRequiredRole>> = HashMap::new();
        for req in work_item::find_required_roles(&self.pool, store_id).await? {
            required.entry(req.work_item_id).or_default().push(req);
        }
        Ok(items
            .into_iter()
            .map(|item| WorkItemDetail {
                required_roles: required.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }

    pub async fn list_business_hours(&self, store_id: i64) -> AppResult<Vec<BusinessHour>> {
        Ok(business_hour::find_all(&self.pool, store_id).await?)
    }

    /// Replace the opening hours of the whole week
    ///
    /// `close_min == 0` is midnight.
    pub async fn replace_business_hours(
        &self,
        store_id: i64,
        hours: Vec<BusinessHourInput>,
    ) -> AppResult<Vec<BusinessHour>> {
        let mut seen = HashSet::new();
        for h in &hours {
            if !(0..=6).contains(&h.weekday) {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("weekday {} must be within 0..=6", h.weekday),
                ));
            }
            if !seen.insert(h.weekday) {
                return Err(AppError::validation(format!("weekday {} listed twice", h.weekday)));
            }
            let in_day = |m: i32| (0..=MINUTES_PER_DAY).contains(&m);
            if !in_day(h.open_min) || !in_day(h.close_min) {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("hours of weekday {} must be within [0, {MINUTES_PER_DAY}]", h.weekday),
                ));
            }
            if normalize_close_min(h.close_min) <= h.open_min {
                return Err(AppError::validation(format!(
                    "weekday {} closes before it opens",
                    h.weekday
                )));
            }
        }

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        Self::ensure_store(&mut tx, store_id, true).await?;
        let saved = business_hour::replace_all(&mut tx, store_id, &hours).await?;
        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(store_id, days = saved.len(), "Business hours replaced");
        Ok(saved)
    }
}
