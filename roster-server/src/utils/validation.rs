//! Input validation helpers
//!
//! Centralized text length constants and validation functions for roster payloads.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;
use crate::utils::time::MINUTES_PER_DAY;
use shared::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: work item, job role, member
pub const MAX_NAME_LEN: usize = 200;

/// Notes, reasons (assignment notes, unavailability reason)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: role code, role hint
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a work item time window: bounded to `[0, 1440]`, `end > start`,
/// break no longer than the window.
pub fn validate_work_window(start_min: i32, end_min: i32, unpaid_break_min: i32) -> Result<(), AppError> {
    let in_day = |m: i32| (0..=MINUTES_PER_DAY).contains(&m);
    if !in_day(start_min) || !in_day(end_min) {
        return Err(AppError::with_message(
            ErrorCode::WorkItemInvalidTime,
            format!("start_min/end_min must be within [0, {MINUTES_PER_DAY}]"),
        ));
    }
    if end_min <= start_min {
        return Err(AppError::with_message(
            ErrorCode::WorkItemInvalidTime,
            format!("end_min ({end_min}) must be greater than start_min ({start_min})"),
        ));
    }
    if unpaid_break_min < 0 || unpaid_break_min > end_min - start_min {
        return Err(AppError::with_message(
            ErrorCode::WorkItemInvalidTime,
            format!(
                "unpaid_break_min ({unpaid_break_min}) must be between 0 and the shift length ({})",
                end_min - start_min
            ),
        ));
    }
    Ok(())
}
