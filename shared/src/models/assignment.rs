//! Schedule Assignment Model (排班)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assignment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    Confirmed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "ASSIGNED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// ASSIGNED → CONFIRMED | CANCELLED, CONFIRMED → CANCELLED.
    /// CANCELLED is terminal. Staying in the same status is always allowed.
    pub fn can_transition_to(&self, next: AssignmentStatus) -> bool {
        use AssignmentStatus::*;
        matches!(
            (self, next),
            (Assigned, _) | (Confirmed, Confirmed) | (Confirmed, Cancelled) | (Cancelled, Cancelled)
        )
    }

    /// Whether the assignment counts toward paid hours
    pub fn is_billable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member on one work item on one date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ScheduleAssignment {
    pub id: i64,
    pub store_id: i64,
    pub member_id: i64,
    pub work_item_id: i64,
    pub date: NaiveDate,
    /// HH:MM
    pub start_time: String,
    /// HH:MM, may be earlier than start_time for overnight shifts
    pub end_time: String,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Assignment row about to be inserted with status `ASSIGNED`
///
/// Produced by auto-assign, week copy and manual assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub member_id: i64,
    pub work_item_id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Manual assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreate {
    pub member_id: i64,
    pub work_item_id: i64,
    pub date: NaiveDate,
    /// Defaults to the work item start
    pub start_time: Option<String>,
    /// Defaults to the work item end
    pub end_time: Option<String>,
    pub notes: Option<String>,
    /// Reject when the work item's role minimums are not met afterwards
    #[serde(default)]
    pub enforce_coverage: bool,
}

/// Update assignment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    pub status: Option<AssignmentStatus>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&AssignmentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
        let status: AssignmentStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, AssignmentStatus::Cancelled);
    }

    #[test]
    fn test_status_transitions() {
        use AssignmentStatus::*;
        assert!(Assigned.can_transition_to(Confirmed));
        assert!(Assigned.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Assigned));
        assert!(!Cancelled.can_transition_to(Assigned));
        assert!(!Cancelled.can_transition_to(Confirmed));
    }
}
