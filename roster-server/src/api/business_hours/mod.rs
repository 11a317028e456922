//! Business Hours API 模块 (营业时间)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/stores/{store_id}/business-hours",
        get(handler::list).put(handler::replace),
    )
}
