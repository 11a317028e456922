//! Work Item API 模块 (班次模板)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/stores/{store_id}/work-items",
        get(handler::list).post(handler::create),
    )
}
