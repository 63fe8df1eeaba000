//! Discount API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Discount, DiscountCreate, DiscountPatch};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::parse_id;

const RESOURCE: &str = "discount";

/// GET /api/discounts - 获取所有折扣
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Discount>>> {
    let discounts = state.discounts.list().await?;
    Ok(Json(discounts))
}

/// GET /api/discounts/{id} - 获取单个折扣
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Discount>> {
    let id = parse_id(&id, RESOURCE)?;
    let discount = state.discounts.get(id).await?;
    Ok(Json(discount))
}

/// POST /api/discounts - 创建折扣
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<DiscountCreate>,
) -> AppResult<(StatusCode, Json<Discount>)> {
    let discount = state.discounts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(discount)))
}

/// PUT /api/discounts/{id} - 整体替换折扣
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<DiscountCreate>,
) -> AppResult<Json<Discount>> {
    let id = parse_id(&id, RESOURCE)?;
    let discount = state.discounts.replace(id, payload).await?;
    Ok(Json(discount))
}

/// PATCH /api/discounts/{id} - 部分修改折扣
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<DiscountPatch>,
) -> AppResult<Json<Discount>> {
    let id = parse_id(&id, RESOURCE)?;
    let discount = state.discounts.patch(id, payload).await?;
    Ok(Json(discount))
}

/// DELETE /api/discounts/{id} - 删除折扣
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, RESOURCE)?;
    state.discounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/discounts/{id}/renew - 续期并重新激活
pub async fn renew(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Discount>> {
    let id = parse_id(&id, RESOURCE)?;
    let discount = state.discounts.renew(id).await?;
    Ok(Json(discount))
}
