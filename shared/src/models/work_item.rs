//! Work Item Model (班次模板)

use serde::{Deserialize, Serialize};

/// Reusable shift template, bounded in minutes of day `[0, 1440]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkItem {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub start_min: i32,
    pub end_min: i32,
    pub unpaid_break_min: i32,
    /// Stored for display; auto-assignment does not read it
    pub max_headcount: i32,
    pub role_hint: Option<String>,
    pub created_at: i64,
}

/// Minimum headcount of one job role on a work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkItemRequiredRole {
    pub work_item_id: i64,
    pub job_role_id: i64,
    pub min_count: i32,
}

/// Required role entry inside [`WorkItemCreate`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequiredRoleInput {
    pub job_role_id: i64,
    #[serde(default = "default_min_count")]
    pub min_count: i32,
}

/// Create work item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemCreate {
    pub name: String,
    pub start_min: i32,
    pub end_min: i32,
    #[serde(default)]
    pub unpaid_break_min: i32,
    #[serde(default = "default_max_headcount")]
    pub max_headcount: i32,
    pub role_hint: Option<String>,
    #[serde(default)]
    pub required_roles: Vec<RequiredRoleInput>,
}

/// Work item together with its role requirements (API response)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemDetail {
    #[serde(flatten)]
    pub item: WorkItem,
    pub required_roles: Vec<WorkItemRequiredRole>,
}

fn default_min_count() -> i32 {
    1
}

fn default_max_headcount() -> i32 {
    1
}
