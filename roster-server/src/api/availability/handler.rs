//! Availability API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{AvailabilityCreate, UserAvailability};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub member_id: Option<i64>,
}

/// GET /api/stores/:store_id/availability
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<UserAvailability>>> {
    let rows = state
        .schedule
        .list_availability(store_id, query.date_from, query.date_to, query.member_id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/stores/:store_id/availability - 登记不可用日期
pub async fn create(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<AvailabilityCreate>,
) -> AppResult<Json<UserAvailability>> {
    let created = state.schedule.create_availability(store_id, payload).await?;
    Ok(Json(created))
}

/// DELETE /api/stores/:store_id/availability/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path((store_id, id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.schedule.delete_availability(store_id, id).await?;
    Ok(Json(true))
}
