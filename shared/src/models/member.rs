//! Store Member Model

use serde::{Deserialize, Serialize};

/// Store member (门店成员)
///
/// A person's membership in one store. `user_id` is `None` for guest members
/// that have no backing account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub store_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
}

/// Member ↔ job role link row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberJobRole {
    pub member_id: i64,
    pub job_role_id: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    pub user_id: Option<i64>,
    #[serde(default)]
    pub job_role_ids: Vec<i64>,
}
