//! Input validation helpers
//!
//! Centralized text length constants, numeric bounds and identity parsing.
//! Every check here runs before any store call.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: location, discount, table label, item name
pub const MAX_NAME_LEN: usize = 200;

/// Notes and free-text remarks
pub const MAX_NOTE_LEN: usize = 500;

/// Redemption codes
pub const MAX_CODE_LEN: usize = 64;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum allowed price per item (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed single payment / total amount (10,000,000)
pub const MAX_AMOUNT: f64 = 10_000_000.0;
/// Maximum line items on a booking or sale
pub const MAX_ITEMS: usize = 500;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Unwrap a required payload field
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::validation(format!("{field} is required")).with_detail("field", field)
    })
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Unit price: finite, non-negative, bounded
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(())
}

/// Quantity: at least 1, bounded
pub fn validate_quantity(value: i32, field: &str) -> Result<(), AppError> {
    if value < 1 {
        return Err(AppError::validation(format!(
            "{field} must be at least 1, got {value}"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_QUANTITY}), got {value}"
        )));
    }
    Ok(())
}

/// Monetary amount: finite, non-negative, bounded
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

// ── Identities ──────────────────────────────────────────────────────

/// Parse a path identity, rejecting anything but a positive integer
pub fn parse_id(raw: &str, resource: &str) -> Result<i64, AppError> {
    shared::util::parse_id(raw).ok_or_else(|| {
        AppError::validation(format!("Invalid {resource} id: '{raw}'"))
            .with_detail("resource", resource)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("T1", "tableNumber", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "tableNumber", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "tableNumber", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        let long = Some("n".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_numbers() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(-0.01, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "price").is_err());
        assert!(validate_quantity(1, "qty").is_ok());
        assert!(validate_quantity(0, "qty").is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1, "qty").is_err());
        assert!(validate_amount(f64::INFINITY, "amount").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("123", "booking").unwrap(), 123);
        let err = parse_id("abc", "booking").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("booking"));
    }
}
