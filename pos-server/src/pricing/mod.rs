//! Pricing Engine
//!
//! Pure computation: line totals, VAT, discount effect and settlement.
//! Nothing here touches the store; callers persist the results.

mod discount;
pub mod money;
mod settlement;
mod tax;

pub use discount::{DiscountOutcome, apply_discount};
pub use settlement::reconcile_payments;
pub use tax::{VAT_RATE, compute_vat, resolve_vat};

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{BookingItem, SaleItem};
use thiserror::Error;

use money::{to_decimal, to_f64};

/// Pricing engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Discount {id} has expired")]
    DiscountExpired { id: i64 },

    #[error("{0}")]
    DiscountInvalid(String),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match &err {
            PricingError::DiscountExpired { id } => {
                AppError::with_message(ErrorCode::DiscountExpired, err.to_string())
                    .with_detail("discountId", *id)
            }
            PricingError::DiscountInvalid(_) => {
                AppError::with_message(ErrorCode::DiscountInvalid, err.to_string())
            }
        }
    }
}

/// A priced line: unit price times quantity
pub trait PricedLine {
    fn unit_price(&self) -> f64;
    fn quantity(&self) -> i32;
}

impl PricedLine for BookingItem {
    fn unit_price(&self) -> f64 {
        self.price
    }

    fn quantity(&self) -> i32 {
        self.qty
    }
}

impl PricedLine for SaleItem {
    fn unit_price(&self) -> f64 {
        self.unit_price
    }

    fn quantity(&self) -> i32 {
        self.quantity
    }
}

/// Sum of `unit_price * quantity` over all lines
pub fn bill_total<L: PricedLine>(lines: &[L]) -> f64 {
    let total = lines.iter().fold(Decimal::ZERO, |acc, line| {
        acc + to_decimal(line.unit_price()) * Decimal::from(line.quantity())
    });
    to_f64(total)
}
