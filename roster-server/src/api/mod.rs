//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`schedule`] - 自动排班、岗位覆盖校验、复制周
//! - [`assignments`] - 排班记录
//! - [`availability`] - 不可用日期
//! - [`work_items`] - 班次模板
//! - [`business_hours`] - 营业时间
//! - [`reports`] - 工时报表
//!
//! 所有业务路由都挂在 `/api/stores/{store_id}` 下，认证由上游网关负责。

mod middleware;
mod operator;

pub mod assignments;
pub mod availability;
pub mod business_hours;
pub mod health;
pub mod reports;
pub mod schedule;
pub mod work_items;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use operator::Operator;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(schedule::router())
        .merge(assignments::router())
        .merge(availability::router())
        .merge(work_items::router())
        .merge(business_hours::router())
        .merge(reports::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // ========== Request ID ==========
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
