//! Panic barrier
//!
//! A panicking handler becomes a JSON 500 instead of a dropped connection.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::utils::AppError;

/// `CatchPanicLayer::custom` handler
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");
    AppError::internal("Internal server error").into_response()
}
