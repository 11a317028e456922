//! Auto-assignment: greedy first-fit over (date, work item) slots
//!
//! One deterministic pass, no backtracking. Dates ascend, work items keep
//! their creation order and candidates keep roster order, so identical
//! input always yields identical picks. Unfillable slots are skipped.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::models::{AssignmentDraft, BusinessHour, WorkItem, WorkItemRequiredRole};

use super::candidate_pool::CandidatePool;
use crate::utils::time::{business_weekday, minutes_to_hhmm, normalize_close_min};

pub const DEFAULT_START: &str = "09:00";
pub const DEFAULT_END: &str = "18:00";

/// Everything one run reads
#[derive(Debug)]
pub struct AutoAssignPlan<'a> {
    pub dates: &'a [NaiveDate],
    pub work_items: &'a [WorkItem],
    pub required_roles: &'a [WorkItemRequiredRole],
    pub business_hours: &'a [BusinessHour],
    /// (work item, date) slots that already hold an assignment
    pub filled_slots: &'a HashSet<(i64, NaiveDate)>,
}

/// Start/end for a pick on `date`: the store's opening window for that
/// weekday, or 09:00–18:00 when none is defined
pub fn shift_window(business_hours: &[BusinessHour], date: NaiveDate) -> (String, String) {
    let weekday = business_weekday(date);
    match business_hours.iter().find(|h| h.weekday == weekday) {
        Some(hours) => (
            minutes_to_hhmm(hours.open_min),
            minutes_to_hhmm(normalize_close_min(hours.close_min)),
        ),
        None => (DEFAULT_START.to_string(), DEFAULT_END.to_string()),
    }
}

/// Fill open slots, one member each
///
/// Every pick is marked booked in `pool` before the next slot is looked at,
/// so a member never gets two slots on the same date within one run.
pub fn plan_auto_assign(plan: &AutoAssignPlan<'_>, pool: &mut CandidatePool) -> Vec<AssignmentDraft> {
    let mut required_by_item: HashMap<i64, Vec<WorkItemRequiredRole>> = HashMap::new();
    for req in plan.required_roles {
        required_by_item.entry(req.work_item_id).or_default().push(*req);
    }

    let mut drafts = Vec::new();
    for &date in plan.dates {
        let (start_time, end_time) = shift_window(plan.business_hours, date);
        for item in plan.work_items {
            if plan.filled_slots.contains(&(item.id, date)) {
                continue;
            }
            let required = required_by_item
                .get(&item.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let Some(member_id) = pool.first_candidate(required, date) else {
                tracing::debug!(work_item_id = item.id, %date, "No candidate for slot");
                continue;
            };
            pool.mark_booked(member_id, date);
            drafts.push(AssignmentDraft {
                member_id,
                work_item_id: item.id,
                date,
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                notes: None,
            });
        }
    }
    drafts
}
