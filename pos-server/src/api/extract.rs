//! Request extractors

use axum::extract::FromRequest;

use crate::utils::AppError;

/// `Json` whose rejections (malformed JSON, wrong field types) come back as
/// `ValidationFailed` JSON errors
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
