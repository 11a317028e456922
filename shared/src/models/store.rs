//! Store Model
//!
//! Tenant boundary of every roster entity. Stores are archived, never deleted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub archived_at: Option<i64>,
    pub created_at: i64,
}

impl Store {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}
