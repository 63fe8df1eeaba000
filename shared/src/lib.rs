//! Shared types for the HosPOS backend
//!
//! - [`error`]: unified error codes and the JSON error body
//! - [`models`]: booking, discount, ledger and terminal models
//! - [`util`]: time and identity helpers

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
