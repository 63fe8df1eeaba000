//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预订生命周期接口
//! - [`discounts`] - 折扣管理接口
//! - [`sales`] - 销售记录与结算接口
//! - [`payments`] - 支付记录接口
//! - [`linking`] - 终端绑定与心跳
//! - [`locations`] - 门店终端位置接口
//! - [`finance`] - 财务汇总 (只读)
//! - [`devtools`] - 开发环境种子数据

pub mod extract;

pub mod bookings;
pub mod devtools;
pub mod discounts;
pub mod finance;
pub mod health;
pub mod linking;
pub mod locations;
pub mod payments;
pub mod sales;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;

pub use extract::AppJson;

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
        // Health API - public route
        .merge(health::router())
        // Core: bookings, pricing, terminals
        .merge(bookings::router())
        .merge(discounts::router())
        .merge(sales::router())
        .merge(payments::router())
        .merge(linking::router())
        .merge(locations::router())
        .merge(finance::router())
        // Development only
        .merge(devtools::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by the HTTP server and by the in-process HTTP tests.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Fault barrier ==========
        // A panicking handler becomes a JSON 500
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, every inner layer sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
