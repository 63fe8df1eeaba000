//! Booking API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/bookings | GET | 列出所有预订 |
//! | /api/bookings | POST | 创建预订 (需已绑定终端) |
//! | /api/bookings/{id} | GET | 获取单个预订 |
//! | /api/bookings/{id} | PATCH | 更新状态/预订时间 (需已绑定终端) |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
}
