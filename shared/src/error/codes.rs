//! Unified error codes for the roster service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Store errors
//! - 2xxx: Member / job role errors
//! - 3xxx: Work item errors
//! - 4xxx: Assignment / scheduling errors
//! - 5xxx: Availability errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Store ====================
    /// Store not found
    StoreNotFound = 1001,
    /// Store is archived
    StoreArchived = 1002,

    // ==================== 2xxx: Member ====================
    /// Member not found
    MemberNotFound = 2001,
    /// Member is deactivated
    MemberInactive = 2002,
    /// Job role not found
    JobRoleNotFound = 2101,

    // ==================== 3xxx: Work item ====================
    /// Work item not found
    WorkItemNotFound = 3001,
    /// Work item time range is invalid
    WorkItemInvalidTime = 3002,

    // ==================== 4xxx: Scheduling ====================
    /// Assignment not found
    AssignmentNotFound = 4001,
    /// Date range is malformed (from > to, unparsable)
    InvalidDateRange = 4002,
    /// Week start is not a Monday
    InvalidWeekStart = 4003,
    /// Member already holds an ASSIGNED assignment that date
    MemberAlreadyAssigned = 4004,
    /// Required role minimums are not met
    InsufficientRoleCoverage = 4005,
    /// Status transition is not allowed
    InvalidStatusTransition = 4006,
    /// Week copy failed after the target week was touched
    WeekCopyFailed = 4101,

    // ==================== 5xxx: Availability ====================
    /// Member declared the date unavailable
    MemberUnavailable = 5001,
    /// Availability record not found
    AvailabilityNotFound = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::StoreArchived => "Store is archived",

            // Member
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::MemberInactive => "Member is inactive",
            ErrorCode::JobRoleNotFound => "Job role not found",

            // Work item
            ErrorCode::WorkItemNotFound => "Work item not found",
            ErrorCode::WorkItemInvalidTime => "Work item time range is invalid",

            // Scheduling
            ErrorCode::AssignmentNotFound => "Assignment not found",
            ErrorCode::InvalidDateRange => "Invalid date range",
            ErrorCode::InvalidWeekStart => "Week start must be a Monday",
            ErrorCode::MemberAlreadyAssigned => "Member is already assigned on this date",
            ErrorCode::InsufficientRoleCoverage => "Required role coverage is not met",
            ErrorCode::InvalidStatusTransition => "Assignment status transition is not allowed",
            ErrorCode::WeekCopyFailed => "Week copy failed",

            // Availability
            ErrorCode::MemberUnavailable => "Member is unavailable on this date",
            ErrorCode::AvailabilityNotFound => "Availability record not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Store
            1001 => Ok(ErrorCode::StoreNotFound),
            1002 => Ok(ErrorCode::StoreArchived),

            // Member
            2001 => Ok(ErrorCode::MemberNotFound),
            2002 => Ok(ErrorCode::MemberInactive),
            2101 => Ok(ErrorCode::JobRoleNotFound),

            // Work item
            3001 => Ok(ErrorCode::WorkItemNotFound),
            3002 => Ok(ErrorCode::WorkItemInvalidTime),

            // Scheduling
            4001 => Ok(ErrorCode::AssignmentNotFound),
            4002 => Ok(ErrorCode::InvalidDateRange),
            4003 => Ok(ErrorCode::InvalidWeekStart),
            4004 => Ok(ErrorCode::MemberAlreadyAssigned),
            4005 => Ok(ErrorCode::InsufficientRoleCoverage),
            4006 => Ok(ErrorCode::InvalidStatusTransition),
            4101 => Ok(ErrorCode::WeekCopyFailed),

            // Availability
            5001 => Ok(ErrorCode::MemberUnavailable),
            5002 => Ok(ErrorCode::AvailabilityNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
