//! VAT computation

use rust_decimal::Decimal;

use super::money::{to_decimal, to_f64};

/// Regional VAT rate (20%)
pub const VAT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// VAT on a pre-tax total
pub fn compute_vat(total: f64) -> f64 {
    to_f64(to_decimal(total) * VAT_RATE)
}

/// VAT for a write path
///
/// A caller-supplied non-zero VAT is authoritative (offline terminals
/// precompute it); absent or zero VAT is computed from `total`.
pub fn resolve_vat(total: f64, supplied: Option<f64>) -> f64 {
    match supplied {
        Some(vat) if vat != 0.0 => to_f64(to_decimal(vat)),
        _ => compute_vat(total),
    }
}
