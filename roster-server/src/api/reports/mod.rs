//! Report API 模块 (工时统计)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/stores/{store_id}/reports/paid-hours",
        get(handler::paid_hours),
    )
}
