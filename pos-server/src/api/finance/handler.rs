//! Finance API Handlers

use axum::{Json, extract::State};
use shared::models::FinanceSummary;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/finance/summary - 账本汇总
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<FinanceSummary>> {
    let summary = state.ledger.finance_summary().await?;
    Ok(Json(summary))
}
