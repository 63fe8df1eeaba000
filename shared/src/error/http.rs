//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::BookingNotFound
            | Self::SaleNotFound
            | Self::DiscountNotFound
            | Self::LocationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::TerminalNotLinked => StatusCode::FORBIDDEN,

            // 500 Internal Server Error (store failures included, terminals own retry)
            Self::InternalError | Self::StoreUnavailable | Self::StoreTimeout => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation, transitions, discount and link failures)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
