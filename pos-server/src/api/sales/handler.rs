//! Sale API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Sale, SaleCreate, Settlement};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::middleware::LinkedTill;
use crate::utils::AppResult;
use crate::utils::validation::parse_id;

const RESOURCE: &str = "sale";

/// GET /api/sales - 获取所有销售记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Sale>>> {
    let sales = state.ledger.list_sales().await?;
    Ok(Json(sales))
}

/// GET /api/sales/{id} - 获取单个销售记录
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Sale>> {
    let id = parse_id(&id, RESOURCE)?;
    let sale = state.ledger.get_sale(id).await?;
    Ok(Json(sale))
}

/// POST /api/sales - 记录销售 (计算税额、折扣与结算状态)
pub async fn create(
    State(state): State<ServerState>,
    _till: LinkedTill,
    AppJson(payload): AppJson<SaleCreate>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let sale = state.ledger.create_sale(payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// GET /api/sales/{id}/settlement - 当前结算状态 (含后续支付)
pub async fn settlement(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Settlement>> {
    let id = parse_id(&id, RESOURCE)?;
    let settlement = state.ledger.settlement(id).await?;
    Ok(Json(settlement))
}
