//! Business Hour Model (营业时间)

use serde::{Deserialize, Serialize};

/// Opening window of a store for one weekday
///
/// `weekday` counts from Sunday (0) to Saturday (6).
/// `close_min == 0` means midnight and must be read as 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusinessHour {
    pub store_id: i64,
    pub weekday: i32,
    pub open_min: i32,
    pub close_min: i32,
}

/// One weekday entry of a business-hours replacement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BusinessHourInput {
    pub weekday: i32,
    pub open_min: i32,
    pub close_min: i32,
}
