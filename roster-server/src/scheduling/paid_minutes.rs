//! Paid minutes: billable time of a shift after the unpaid break
//!
//! An end at or before the start means the shift crosses midnight.

use std::collections::BTreeMap;

use shared::models::{Member, PaidHoursSummary};

use crate::utils::AppResult;
use crate::utils::time::{MINUTES_PER_DAY, parse_hhmm};

/// Payable minutes between two minute-of-day values
pub fn paid_minutes_between(start_min: i32, end_min: i32, unpaid_break_min: i32) -> i64 {
    let end_min = if end_min <= start_min {
        end_min + MINUTES_PER_DAY
    } else {
        end_min
    };
    i64::from((end_min - start_min - unpaid_break_min).max(0))
}

/// Payable minutes of an `HH:MM`–`HH:MM` shift
pub fn paid_minutes(start_time: &str, end_time: &str, unpaid_break_min: i32) -> AppResult<i64> {
    Ok(paid_minutes_between(
        parse_hhmm(start_time)?,
        parse_hhmm(end_time)?,
        unpaid_break_min,
    ))
}

/// Minutes → hours rounded to one decimal
pub fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

/// Sum `(member_id, minutes)` per member
///
/// Output follows `members` order; members without shifts are left out.
/// Ids missing from `members` come last, ascending.
pub fn summarize(
    shifts: impl IntoIterator<Item = (i64, i64)>,
    members: &[Member],
) -> Vec<PaidHoursSummary> {
    let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
    for (member_id, minutes) in shifts {
        *totals.entry(member_id).or_default() += minutes;
    }

    let mut summaries = Vec::with_capacity(totals.len());
    for member in members {
        if let Some(minutes) = totals.remove(&member.id) {
            summaries.push(PaidHoursSummary {
                member_id: member.id,
                member_name: member.name.clone(),
                paid_minutes: minutes,
                paid_hours: minutes_to_hours(minutes),
            });
        }
    }
    for (member_id, minutes) in totals {
        summaries.push(PaidHoursSummary {
            member_id,
            member_name: format!("#{member_id}"),
            paid_minutes: minutes,
            paid_hours: minutes_to_hours(minutes),
        });
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_wraparound() {
        assert_eq!(paid_minutes("22:00", "02:00", 0).unwrap(), 240);
        assert_eq!(minutes_to_hours(240), 4.0);
    }

    #[test]
    fn test_break_deduction() {
        assert_eq!(paid_minutes("09:00", "18:00", 60).unwrap(), 480);
        assert_eq!(minutes_to_hours(480), 8.0);
    }

    #[test]
    fn test_edge_cases() {
        // Same start and end is a full day
        assert_eq!(paid_minutes("08:00", "08:00", 0).unwrap(), 1440);
        assert_eq!(paid_minutes("08:00", "24:00", 0).unwrap(), 960);
        // Break longer than the shift pays nothing
        assert_eq!(paid_minutes("09:00", "10:00", 90).unwrap(), 0);
        assert!(paid_minutes("9:00", "10:00", 0).is_err());
    }

    #[test]
    fn test_hours_rounding() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(100), 1.7);
        assert_eq!(minutes_to_hours(45), 0.8);
    }

    #[test]
    fn test_summarize() {
        let members = vec![
            Member {
                id: 2,
                store_id: 1,
                user_id: None,
                name: "Bea".into(),
                is_active: true,
                created_at: 1,
            },
            Member {
                id: 1,
                store_id: 1,
                user_id: None,
                name: "Ana".into(),
                is_active: false,
                created_at: 2,
            },
        ];
        let summary = summarize([(1, 240), (2, 480), (1, 30), (9, 60)], &members);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].member_name, "Bea");
        assert_eq!(summary[0].paid_hours, 8.0);
        assert_eq!(summary[1].member_id, 1);
        assert_eq!(summary[1].paid_minutes, 270);
        assert_eq!(summary[1].paid_hours, 4.5);
        assert_eq!(summary[2].member_name, "#9");
    }
}
