//! Data models
//!
//! Shared between roster-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, dates are `NaiveDate` (stored as `YYYY-MM-DD`).

pub mod assignment;
pub mod availability;
pub mod business_hour;
pub mod job_role;
pub mod member;
pub mod schedule;
pub mod store;
pub mod work_item;

// Re-exports
pub use assignment::*;
pub use availability::*;
pub use business_hour::*;
pub use job_role::*;
pub use member::*;
pub use schedule::*;
pub use store::*;
pub use work_item::*;
