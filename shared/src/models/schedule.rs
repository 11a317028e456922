//! Scheduling request / result payloads
//!
//! Auto-assign, role coverage validation, week copy and paid-hours report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Auto-assign trigger
///
/// With both `member_id` and `date` the scope is a single grid cell,
/// otherwise the whole `[date_from, date_to]` range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAssignRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub member_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignResponse {
    pub created_count: usize,
}

/// Role coverage validation trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCoverageRequest {
    pub work_item_ids: Vec<i64>,
    pub assigned_member_ids: Vec<i64>,
}

/// Coverage of one required role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCoverage {
    pub role_id: i64,
    pub role_name: String,
    pub role_code: String,
    pub required_count: i32,
    pub current_count: i32,
    pub is_sufficient: bool,
}

impl RoleCoverage {
    /// `"<role>: <current>/<required>"`, left to the caller to localize
    pub fn shortfall_label(&self) -> String {
        format!(
            "{}: {}/{}",
            self.role_name, self.current_count, self.required_count
        )
    }
}

/// Coverage validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub is_valid: bool,
    pub role_coverage: Vec<RoleCoverage>,
    pub insufficient_roles: Vec<RoleCoverage>,
    /// Language-neutral `"role: current/required"` tuples joined by `", "`
    pub message: String,
}

/// Copy week trigger (both dates must be Mondays)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyWeekRequest {
    pub source_week_start: NaiveDate,
    pub target_week_start: NaiveDate,
}

/// Week copy outcome
///
/// Deletion and insertion are reported separately so the caller can tell
/// "replaced with nothing" (`NothingToCopy { deleted_count > 0 }`) from
/// "nothing to do" (`NothingToCopy { deleted_count: 0 }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WeekCopyResult {
    Copied {
        copied_count: usize,
        deleted_count: usize,
    },
    NothingToCopy {
        deleted_count: usize,
    },
    /// Source and target are the same week; nothing was deleted or inserted
    SameWeek {
        source_count: usize,
    },
}

impl WeekCopyResult {
    pub fn copied_count(&self) -> usize {
        match self {
            Self::Copied { copied_count, .. } => *copied_count,
            Self::NothingToCopy { .. } | Self::SameWeek { .. } => 0,
        }
    }

    pub fn deleted_count(&self) -> usize {
        match self {
            Self::Copied { deleted_count, .. } | Self::NothingToCopy { deleted_count } => {
                *deleted_count
            }
            Self::SameWeek { .. } => 0,
        }
    }
}

/// Paid hours report query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaidHoursQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Paid time of one member over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidHoursSummary {
    pub member_id: i64,
    pub member_name: String,
    pub paid_minutes: i64,
    /// Rounded to one decimal
    pub paid_hours: f64,
}
