//! 时间工具函数 — minute-of-day arithmetic and calendar helpers
//!
//! Work items and business hours are minute-of-day integers in `[0, 1440]`,
//! assignments carry `HH:MM` strings, dates are plain `NaiveDate`s.
//! The store week always starts on Monday.

use chrono::{Datelike, Duration, NaiveDate};

use super::{AppError, AppResult};
use shared::ErrorCode;

pub const MINUTES_PER_DAY: i32 = 1440;

/// Upper bound on the number of days a single scheduling request may span
pub const MAX_RANGE_DAYS: i64 = 366;

/// 解析 HH:MM → minute of day
///
/// `24:00` is accepted and yields 1440 (end of day).
pub fn parse_hhmm(value: &str) -> AppResult<i32> {
    let invalid = || {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid time format (expected HH:MM): {value}"),
        )
    };
    let (h, m) = value.split_once(':').ok_or_else(invalid)?;
    if h.len() != 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;
    if !(0..60).contains(&minutes) || !(0..=24).contains(&hours) {
        return Err(invalid());
    }
    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// minute of day → HH:MM (1440 renders as `24:00`)
pub fn minutes_to_hhmm(minutes: i32) -> String {
    let minutes = minutes.clamp(0, MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Business hours store midnight closing as 0
pub fn normalize_close_min(close_min: i32) -> i32 {
    if close_min == 0 {
        MINUTES_PER_DAY
    } else {
        close_min
    }
}

/// Validate `[from, to]` and return every date in it, ascending
pub fn dates_inclusive(from: NaiveDate, to: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    if from > to {
        return Err(AppError::invalid_date_range(format!(
            "date_from {from} is after date_to {to}"
        )));
    }
    let span = (to - from).num_days() + 1;
    if span > MAX_RANGE_DAYS {
        return Err(AppError::invalid_date_range(format!(
            "date range spans {span} days (max {MAX_RANGE_DAYS})"
        )));
    }
    Ok(from.iter_days().take(span as usize).collect())
}

/// Weekday index with Monday = 0 .. Sunday = 6 (week copy mapping)
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// Weekday as stored in business hours, Sunday = 0 .. Saturday = 6
pub fn business_weekday(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// Ensure `date` is a week start (Monday)
pub fn require_week_start(date: NaiveDate) -> AppResult<NaiveDate> {
    if weekday_index(date) != 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidWeekStart,
            format!("{date} is a {}, not a Monday", date.weekday()),
        ));
    }
    Ok(date)
}

/// Monday..Sunday bounds of the week starting at `week_start`
pub fn week_bounds(week_start: NaiveDate) -> (NaiveDate, NaiveDate) {
    (week_start, week_start + Duration::days(6))
}

/// Date on weekday `index` (Monday = 0) of the week starting at `week_start`
pub fn date_in_week(week_start: NaiveDate, index: u32) -> NaiveDate {
    week_start + Duration::days(i64::from(index))
}
