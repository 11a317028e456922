//! Week copy: map one week's assignments onto another by weekday
//!
//! Target dates come from the weekday index of each source date, not from
//! adding the raw day offset, so rows outside the source week never drift.

use chrono::NaiveDate;
use shared::models::{AssignmentDraft, ScheduleAssignment};

use crate::utils::time::{date_in_week, week_bounds, weekday_index};

/// Drafts for the target week, in source order
///
/// Rows dated outside the source week are dropped.
pub fn plan_week_copy(
    source: &[ScheduleAssignment],
    source_week_start: NaiveDate,
    target_week_start: NaiveDate,
) -> Vec<AssignmentDraft> {
    let (from, to) = week_bounds(source_week_start);
    source
        .iter()
        .filter(|a| a.date >= from && a.date <= to)
        .map(|a| AssignmentDraft {
            member_id: a.member_id,
            work_item_id: a.work_item_id,
            date: date_in_week(target_week_start, weekday_index(a.date)),
            start_time: a.start_time.clone(),
            end_time: a.end_time.clone(),
            notes: a.notes.clone(),
        })
        .collect()
}
