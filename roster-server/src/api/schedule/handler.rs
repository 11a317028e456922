//! Schedule API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::Operator;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    AutoAssignRequest, AutoAssignResponse, CopyWeekRequest, CoverageReport,
    ValidateCoverageRequest, WeekCopyResult,
};

/// POST /api/stores/:store_id/schedule/auto-assign - 自动排班
pub async fn auto_assign(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    operator: Operator,
    Json(payload): Json<AutoAssignRequest>,
) -> AppResult<Json<AutoAssignResponse>> {
    let result = state
        .schedule
        .auto_assign(store_id, payload, operator.as_str())
        .await?;
    Ok(Json(result))
}

/// POST /api/stores/:store_id/schedule/validate - 岗位覆盖校验
pub async fn validate(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<ValidateCoverageRequest>,
) -> AppResult<Json<CoverageReport>> {
    let report = state.schedule.validate_coverage(store_id, payload).await?;
    Ok(Json(report))
}

/// POST /api/stores/:store_id/schedule/copy-week - 复制周排班
pub async fn copy_week(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    operator: Operator,
    Json(payload): Json<CopyWeekRequest>,
) -> AppResult<Json<WeekCopyResult>> {
    let result = state
        .schedule
        .copy_week(store_id, payload, operator.as_str())
        .await?;
    Ok(Json(result))
}
