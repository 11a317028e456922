//! Assignment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::Operator;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{AssignmentCreate, AssignmentUpdate, ScheduleAssignment};

/// Query params for listing assignments
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub member_id: Option<i64>,
}

/// GET /api/stores/:store_id/assignments - 获取排班列表
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ScheduleAssignment>>> {
    let rows = state
        .schedule
        .list_assignments(store_id, query.date_from, query.date_to, query.member_id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/stores/:store_id/assignments - 手动排班
pub async fn create(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    operator: Operator,
    Json(payload): Json<AssignmentCreate>,
) -> AppResult<Json<ScheduleAssignment>> {
    let created = state
        .schedule
        .manual_assign(store_id, payload, operator.as_str())
        .await?;
    Ok(Json(created))
}

/// PUT /api/stores/:store_id/assignments/:id - 更新状态 / 时间 / 备注
pub async fn update(
    State(state): State<ServerState>,
    Path((store_id, id)): Path<(i64, i64)>,
    Json(payload): Json<AssignmentUpdate>,
) -> AppResult<Json<ScheduleAssignment>> {
    let updated = state.schedule.update_assignment(store_id, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/stores/:store_id/assignments/:id - 删除排班
pub async fn delete(
    State(state): State<ServerState>,
    Path((store_id, id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.schedule.delete_assignment(store_id, id).await?;
    Ok(Json(true))
}
