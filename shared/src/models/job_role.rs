//! Job Role Model

use serde::{Deserialize, Serialize};

/// Job role (岗位), e.g. "barista"
///
/// Deactivating a role keeps historical assignments intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct JobRole {
    pub id: i64,
    pub store_id: i64,
    pub code: String,
    pub name: String,
    pub is_active: bool,
}

/// Create job role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRoleCreate {
    pub code: String,
    pub name: String,
}
