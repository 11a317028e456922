//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Store errors
/// - 2xxx: Member errors
/// - 3xxx: Work item errors
/// - 4xxx: Scheduling errors
/// - 5xxx: Availability errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Store errors (1xxx)
    Store,
    /// Member errors (2xxx)
    Member,
    /// Work item errors (3xxx)
    WorkItem,
    /// Scheduling errors (4xxx)
    Scheduling,
    /// Availability errors (5xxx)
    Availability,
    /// System errors (9xxx and unassigned ranges)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Store,
            2000..3000 => Self::Member,
            3000..4000 => Self::WorkItem,
            4000..5000 => Self::Scheduling,
            5000..6000 => Self::Availability,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Store => "store",
            Self::Member => "member",
            Self::WorkItem => "work_item",
            Self::Scheduling => "scheduling",
            Self::Availability => "availability",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
