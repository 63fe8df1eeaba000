//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use shared::models::{Booking, BookingCreate, BookingUpdate};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::middleware::LinkedTill;
use crate::utils::AppResult;
use crate::utils::validation::parse_id;

const RESOURCE: &str = "booking";

/// GET /api/bookings - 获取所有预订
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.bookings.list().await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/{id} - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let id = parse_id(&id, RESOURCE)?;
    let booking = state.bookings.get(id).await?;
    Ok(Json(booking))
}

/// POST /api/bookings - 创建预订 (服务端重新计算账单总额)
pub async fn create(
    State(state): State<ServerState>,
    LinkedTill(till): LinkedTill,
    AppJson(payload): AppJson<BookingCreate>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.bookings.create(payload).await?;
    if let Some(till) = till {
        tracing::debug!(booking_id = booking.id, till_id = till, "Booking submitted by terminal");
    }
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PATCH /api/bookings/{id} - 更新状态和/或预订时间
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    _till: LinkedTill,
    AppJson(payload): AppJson<BookingUpdate>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id, RESOURCE)?;
    state.bookings.update(id, payload).await?;
    Ok(Json(json!({ "success": true })))
}
