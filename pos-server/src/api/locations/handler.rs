//! Location API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Location, LocationCreate, LocationView};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::parse_id;

const RESOURCE: &str = "location";

/// GET /api/locations - 获取所有位置 (含在线状态)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LocationView>>> {
    let locations = state.terminals.list_locations().await?;
    Ok(Json(locations))
}

/// GET /api/locations/{id} - 获取单个位置
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let id = parse_id(&id, RESOURCE)?;
    let location = state.terminals.get_location(id).await?;
    Ok(Json(location))
}

/// POST /api/locations - 创建位置并生成绑定码
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<LocationCreate>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let location = state.terminals.create_location(payload).await?;
    Ok((StatusCode::CREATED, Json(location)))
}
