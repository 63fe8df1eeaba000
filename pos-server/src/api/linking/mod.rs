//! 终端绑定与心跳路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/linking/link | POST | 使用绑定码绑定终端，返回初始数据快照 |
//! | /api/heartbeat | POST | 终端心跳 |
//!
//! 查找失败以 `success: false` (HTTP 200) 返回，客户端需检查响应体。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/linking/link", post(handler::link))
        .route("/api/heartbeat", post(handler::heartbeat))
}
