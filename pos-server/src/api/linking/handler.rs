//! Linking API Handlers

use axum::{Json, extract::State};
use shared::models::{HeartbeatRequest, HeartbeatResponse, LinkRequest, LinkResponse};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/linking/link - 终端绑定
pub async fn link(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<LinkRequest>,
) -> AppResult<Json<LinkResponse>> {
    let response = state.terminals.link(payload).await?;
    Ok(Json(response))
}

/// POST /api/heartbeat - 终端心跳
pub async fn heartbeat(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<HeartbeatRequest>,
) -> AppResult<Json<HeartbeatResponse>> {
    let response = state.terminals.heartbeat(payload).await?;
    Ok(Json(response))
}
