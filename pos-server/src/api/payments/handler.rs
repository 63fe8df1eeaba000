//! Payment API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Payment, PaymentCreate};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::middleware::LinkedTill;
use crate::utils::AppResult;

/// GET /api/payments - 获取所有支付记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Payment>>> {
    let payments = state.ledger.list_payments().await?;
    Ok(Json(payments))
}

/// POST /api/payments - 记录支付 (所属销售必须存在)
pub async fn create(
    State(state): State<ServerState>,
    _till: LinkedTill,
    AppJson(payload): AppJson<PaymentCreate>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let payment = state.ledger.create_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}
