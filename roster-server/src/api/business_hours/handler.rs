//! Business Hours API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{BusinessHour, BusinessHourInput};

/// GET /api/stores/:store_id/business-hours
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<Vec<BusinessHour>>> {
    Ok(Json(state.schedule.list_business_hours(store_id).await?))
}

/// PUT /api/stores/:store_id/business-hours - 整周替换
pub async fn replace(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<Vec<BusinessHourInput>>,
) -> AppResult<Json<Vec<BusinessHour>>> {
    Ok(Json(
        state.schedule.replace_business_hours(store_id, payload).await?,
    ))
}
