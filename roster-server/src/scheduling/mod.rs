//! Scheduling core
//!
//! Pure planning functions over rows loaded per request, plus the service
//! that loads, plans and persists inside one transaction.

pub mod auto_assign;
pub mod candidate_pool;
pub mod coverage;
pub mod locks;
pub mod paid_minutes;
pub mod service;
pub mod week_copy;

pub use candidate_pool::CandidatePool;
pub use locks::StoreLocks;
pub use service::{SYSTEM_OPERATOR, ScheduleService};
