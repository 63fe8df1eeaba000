//! Discount API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/discounts | GET / POST | 列表 / 创建 |
//! | /api/discounts/{id} | GET / PUT / PATCH / DELETE | 查询 / 替换 / 部分修改 / 删除 |
//! | /api/discounts/{id}/renew | PATCH | 续期一个月并重新激活 |

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/renew", patch(handler::renew))
}
