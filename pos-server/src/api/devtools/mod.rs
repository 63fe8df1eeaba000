//! Devtools API 模块
//!
//! 仅在 `ENVIRONMENT=development` 时可用，其余环境返回 404。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/devtools/seed", post(handler::seed))
}
