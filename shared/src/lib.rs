//! Shared types for the roster service
//!
//! Domain models, the unified error system and small utilities used by
//! roster-server and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
