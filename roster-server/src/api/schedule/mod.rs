//! Schedule API 模块 (自动排班 / 覆盖校验 / 复制周)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/schedule", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/auto-assign", post(handler::auto_assign))
        .route("/validate", post(handler::validate))
        .route("/copy-week", post(handler::copy_week))
}
