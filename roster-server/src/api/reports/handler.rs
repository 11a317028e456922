//! Report API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{PaidHoursQuery, PaidHoursSummary};

/// GET /api/stores/:store_id/reports/paid-hours?date_from=&date_to=
pub async fn paid_hours(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Query(query): Query<PaidHoursQuery>,
) -> AppResult<Json<Vec<PaidHoursSummary>>> {
    Ok(Json(state.schedule.paid_hours(store_id, query).await?))
}
