//! Discount application

use rust_decimal::Decimal;
use shared::models::{Discount, DiscountKind, DiscountValue};

use super::PricingError;
use super::money::{to_decimal, to_f64};

/// Result of applying a discount to a subtotal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountOutcome {
    /// Subtotal after the discount
    pub discounted: f64,
    /// Amount taken off
    pub discount_amount: f64,
}

/// Apply `discount` to `subtotal`
///
/// - inactive discounts fail with [`PricingError::DiscountExpired`]
/// - a code discount needs the matching code presented (case-insensitive)
/// - a static discount ignores any presented code
/// - percent: `subtotal * (1 - percent / 100)`; amount: `max(subtotal - amount, 0)`
pub fn apply_discount(
    subtotal: f64,
    discount: &Discount,
    presented_code: Option<&str>,
) -> Result<DiscountOutcome, PricingError> {
    if !discount.active {
        return Err(PricingError::DiscountExpired { id: discount.id });
    }

    if let DiscountKind::Code { code } = &discount.kind {
        match presented_code.map(str::trim) {
            Some(presented) if presented.eq_ignore_ascii_case(code.trim()) => {}
            Some(_) => {
                return Err(PricingError::DiscountInvalid(format!(
                    "Code does not match discount {}",
                    discount.id
                )));
            }
            None => {
                return Err(PricingError::DiscountInvalid(format!(
                    "Discount {} requires a code",
                    discount.id
                )));
            }
        }
    }

    let base = to_decimal(subtotal);
    let discounted = match discount.value {
        DiscountValue::Percent(percent) => {
            if !(0.0..=100.0).contains(&percent) {
                return Err(PricingError::DiscountInvalid(format!(
                    "Discount {} has percent {} outside [0, 100]",
                    discount.id, percent
                )));
            }
            base * (Decimal::ONE - to_decimal(percent) / Decimal::ONE_HUNDRED)
        }
        DiscountValue::Amount(amount) => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PricingError::DiscountInvalid(format!(
                    "Discount {} has invalid amount {}",
                    discount.id, amount
                )));
            }
            (base - to_decimal(amount)).max(Decimal::ZERO)
        }
    };

    Ok(DiscountOutcome {
        discounted: to_f64(discounted),
        discount_amount: to_f64(base - discounted),
    })
}
