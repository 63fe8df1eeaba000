//! Linked terminal guard
//!
//! With `REQUIRE_LINKED_TILL` on, write handlers taking [`LinkedTill`] only
//! run for requests whose `x-till-id` names a linked location.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::utils::{AppError, ErrorCode};

/// Header carrying the calling terminal's identity
pub const TILL_ID_HEADER: &str = "x-till-id";

/// Calling terminal, if any
///
/// Always `Some` when the guard is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedTill(pub Option<i64>);

fn not_linked(message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::TerminalNotLinked, message)
}

impl FromRequestParts<ServerState> for LinkedTill {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let till_id = parts
            .headers
            .get(TILL_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|raw| shared::util::parse_id(raw.trim()));

        if !state.config.require_linked_till {
            return Ok(Self(till_id));
        }

        let Some(id) = till_id else {
            tracing::warn!(uri = %parts.uri, "Write rejected: missing or malformed x-till-id");
            return Err(not_linked("A linked terminal is required (x-till-id)"));
        };

        if !state.terminals.is_linked(id).await? {
            tracing::warn!(till_id = id, uri = %parts.uri, "Write rejected: terminal not linked");
            return Err(not_linked(format!("Terminal {} is not linked", id)).with_detail("tillId", id));
        }

        Ok(Self(Some(id)))
    }
}
