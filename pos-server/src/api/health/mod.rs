//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 简单健康检查 |
//! | /health/ready | GET | 就绪检查 (探测文档存储) |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::time::Instant;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
}

/// 简单健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
}

/// 就绪检查响应
#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    version: &'static str,
    /// 存储探测延迟 (毫秒)
    #[serde(skip_serializing_if = "Option::is_none")]
    store_latency_ms: Option<u64>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// 基础健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 就绪检查: 存储不可达时返回 503
pub async fn ready(State(state): State<ServerState>) -> (StatusCode, Json<ReadyResponse>) {
    let start = Instant::now();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                store_latency_ms: Some(start.elapsed().as_millis() as u64),
                message: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "error",
                    version: env!("CARGO_PKG_VERSION"),
                    store_latency_ms: None,
                    message: Some(e.to_string()),
                }),
            )
        }
    }
}
