//! Payment reconciliation

use rust_decimal::Decimal;
use shared::models::Settlement;

use super::money::{round_money, to_decimal, to_f64};

/// Compare recorded payments against `total + vat - discount`
///
/// Partial payment is legal; the result only reports settlement status.
pub fn reconcile_payments<I>(total: f64, vat: f64, discount: f64, payments: I) -> Settlement
where
    I: IntoIterator<Item = f64>,
{
    let due = round_money(to_decimal(total) + to_decimal(vat) - to_decimal(discount))
        .max(Decimal::ZERO);
    let paid = round_money(
        payments
            .into_iter()
            .map(to_decimal)
            .fold(Decimal::ZERO, |acc, amount| acc + amount),
    );
    let outstanding = (due - paid).max(Decimal::ZERO);

    Settlement {
        amount_due: to_f64(due),
        paid: to_f64(paid),
        outstanding: to_f64(outstanding),
        settled: paid >= due,
    }
}
