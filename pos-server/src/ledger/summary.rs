//! Finance summary aggregation

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{FinanceSummary, Payment, Sale};

use crate::pricing::money::{to_decimal, to_f64};
use crate::pricing::reconcile_payments;

/// Aggregate the ledger
///
/// `outstanding` reconciles every sale against both its embedded payments and
/// the ledger payments referencing it.
pub fn summarize(sales: &[Sale], payments: &[Payment]) -> FinanceSummary {
    let mut recorded: HashMap<i64, Vec<f64>> = HashMap::new();
    for payment in payments {
        recorded.entry(payment.sale_id).or_default().push(payment.amount);
    }

    let mut total_sales = Decimal::ZERO;
    let mut total_vat = Decimal::ZERO;
    let mut total_discounts = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut outstanding = Decimal::ZERO;

    for sale in sales {
        total_sales += to_decimal(sale.total);
        total_vat += to_decimal(sale.vat);
        total_discounts += to_decimal(sale.discount);
        total_paid += to_decimal(sale.paid);

        let later = recorded.get(&sale.id).map(Vec::as_slice).unwrap_or_default();
        let settlement = reconcile_payments(
            sale.total,
            sale.vat,
            sale.discount,
            sale.payments
                .iter()
                .map(|p| p.amount)
                .chain(later.iter().copied()),
        );
        outstanding += to_decimal(settlement.outstanding);
    }

    let total_payments = payments
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc + to_decimal(p.amount));

    FinanceSummary {
        sale_count: sales.len(),
        total_sales: to_f64(total_sales),
        total_vat: to_f64(total_vat),
        total_discounts: to_f64(total_discounts),
        total_paid: to_f64(total_paid),
        total_payments: to_f64(total_payments),
        outstanding: to_f64(outstanding),
    }
}
