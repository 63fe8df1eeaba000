//! Finance API 模块 (只读汇总)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/finance/summary", get(handler::summary))
}
