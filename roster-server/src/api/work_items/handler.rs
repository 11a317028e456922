//! Work Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{WorkItemCreate, WorkItemDetail};

/// GET /api/stores/:store_id/work-items
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<Vec<WorkItemDetail>>> {
    Ok(Json(state.schedule.list_work_items(store_id).await?))
}

/// POST /api/stores/:store_id/work-items
pub async fn create(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<WorkItemCreate>,
) -> AppResult<Json<WorkItemDetail>> {
    Ok(Json(state.schedule.create_work_item(store_id, payload).await?))
}
