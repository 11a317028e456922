//! User Availability Model
//!
//! A row means the member is NOT available on that date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declared unavailable date of a member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserAvailability {
    pub id: i64,
    pub store_id: i64,
    pub member_id: i64,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: i64,
}

/// Create availability payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCreate {
    pub member_id: i64,
    pub date: NaiveDate,
    pub reason: Option<String>,
}
