//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::StoreNotFound
            | Self::MemberNotFound
            | Self::JobRoleNotFound
            | Self::WorkItemNotFound
            | Self::AssignmentNotFound
            | Self::AvailabilityNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::MemberAlreadyAssigned
            | Self::MemberUnavailable
            | Self::StoreArchived => StatusCode::CONFLICT,

            // 422 Unprocessable (business rule rejected a well-formed request)
            Self::InsufficientRoleCoverage
            | Self::InvalidStatusTransition
            | Self::MemberInactive => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::WeekCopyFailed
            | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
