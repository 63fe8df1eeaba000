//! Unified error codes for the HosPOS backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Booking errors
//! - 5xxx: Sale / payment errors
//! - 6xxx: Discount errors
//! - 7xxx: Terminal errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so terminals written in
/// other languages can switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Booking status change is not legal from its current state
    InvalidTransition = 4002,

    // ==================== 5xxx: Sale / Payment ====================
    /// Sale not found
    SaleNotFound = 5001,
    /// Payment method is not one of cash, card, online
    PaymentInvalidMethod = 5002,

    // ==================== 6xxx: Discount ====================
    /// Discount not found
    DiscountNotFound = 6001,
    /// Discount cannot be applied (type/code mismatch)
    DiscountInvalid = 6002,
    /// Discount is no longer active
    DiscountExpired = 6003,

    // ==================== 7xxx: Terminal ====================
    /// Link code does not match any location
    InvalidLinkCode = 7001,
    /// Terminal identity does not match a linked location
    UnknownTerminal = 7002,
    /// Location not found
    LocationNotFound = 7003,
    /// Request requires a linked terminal
    TerminalNotLinked = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Document store unreachable or failed
    StoreUnavailable = 9002,
    /// Document store did not answer within its budget
    StoreTimeout = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::InvalidTransition => "Booking status transition is not allowed",

            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            ErrorCode::DiscountNotFound => "Discount not found",
            ErrorCode::DiscountInvalid => "Discount cannot be applied",
            ErrorCode::DiscountExpired => "Discount has expired",

            ErrorCode::InvalidLinkCode => "Invalid link code",
            ErrorCode::UnknownTerminal => "Unknown terminal",
            ErrorCode::LocationNotFound => "Location not found",
            ErrorCode::TerminalNotLinked => "Terminal is not linked",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreUnavailable => "Document store unavailable",
            ErrorCode::StoreTimeout => "Document store timed out, retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),

            5001 => Ok(ErrorCode::SaleNotFound),
            5002 => Ok(ErrorCode::PaymentInvalidMethod),

            6001 => Ok(ErrorCode::DiscountNotFound),
            6002 => Ok(ErrorCode::DiscountInvalid),
            6003 => Ok(ErrorCode::DiscountExpired),

            7001 => Ok(ErrorCode::InvalidLinkCode),
            7002 => Ok(ErrorCode::UnknownTerminal),
            7003 => Ok(ErrorCode::LocationNotFound),
            7004 => Ok(ErrorCode::TerminalNotLinked),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreUnavailable),
            9003 => Ok(ErrorCode::StoreTimeout),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
