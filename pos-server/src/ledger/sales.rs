//! SaleLedger

use shared::models::{
    FinanceSummary, Payment, PaymentCreate, PaymentMethod, Sale, SaleCreate, SaleItem,
    SalePayment, Settlement,
};
use shared::util::{now_millis, snowflake_id};
use tracing::{info, warn};

use crate::bookings::BookingManager;
use crate::db::StoreHandle;
use crate::db::repository::{PaymentRepository, SaleRepository};
use crate::discounts::{DiscountDirectory, normalize_code};
use crate::pricing::{self, apply_discount, money, reconcile_payments, resolve_vat};
use crate::utils::validation::{
    MAX_ITEMS, MAX_NAME_LEN, require, validate_amount, validate_price, validate_quantity,
};
use crate::utils::{AppError, AppResult, ErrorCode};

use super::summary::summarize;

fn sale_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::SaleNotFound, format!("Sale {} not found", id))
        .with_detail("saleId", id)
}

fn parse_method(raw: Option<String>, field: &str) -> AppResult<PaymentMethod> {
    let raw = require(raw, field)?;
    raw.parse::<PaymentMethod>().map_err(|e| {
        AppError::with_message(ErrorCode::PaymentInvalidMethod, e).with_detail("field", field)
    })
}

fn validate_payment_amount(amount: Option<f64>, field: &str) -> AppResult<f64> {
    let amount = require(amount, field)?;
    validate_amount(amount, field)?;
    if amount <= 0.0 {
        return Err(AppError::validation(format!("{field} must be positive, got {amount}"))
            .with_detail("field", field));
    }
    Ok(amount)
}

fn validate_items(items: &[SaleItem]) -> AppResult<()> {
    if items.len() > MAX_ITEMS {
        return Err(AppError::validation(format!(
            "Too many items ({}, max {})",
            items.len(),
            MAX_ITEMS
        )));
    }
    for (i, item) in items.iter().enumerate() {
        if item.name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "items[{i}].name is too long (max {MAX_NAME_LEN})"
            )));
        }
        validate_quantity(item.quantity, &format!("items[{i}].quantity"))?;
        validate_price(item.unit_price, &format!("items[{i}].unitPrice"))?;
    }
    Ok(())
}

/// Sale and payment ledger
#[derive(Clone)]
pub struct SaleLedger {
    sales: SaleRepository,
    payments: PaymentRepository,
    discounts: DiscountDirectory,
    bookings: BookingManager,
}

impl SaleLedger {
    pub fn new(store: StoreHandle, discounts: DiscountDirectory, bookings: BookingManager) -> Self {
        Self {
            sales: SaleRepository::new(store.clone()),
            payments: PaymentRepository::new(store),
            discounts,
            bookings,
        }
    }

    // ========== Sales ==========

    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        Ok(self.sales.find_all().await?)
    }

    pub async fn get_sale(&self, id: i64) -> AppResult<Sale> {
        self.sales
            .find_by_id(id)
            .await?
            .ok_or_else(|| sale_not_found(id))
    }

    /// Record a finalized sale
    ///
    /// Pricing runs synchronously here: total from the items (or the offline
    /// precomputed total), VAT, discount, then settlement of the embedded
    /// payments. Everything is validated before the single insert.
    pub async fn create_sale(&self, payload: SaleCreate) -> AppResult<Sale> {
        validate_items(&payload.items)?;

        let total = if payload.items.is_empty() {
            let total = require(payload.total, "total")?;
            validate_amount(total, "total")?;
            total
        } else {
            let computed = pricing::bill_total(&payload.items);
            if let Some(submitted) = payload.total
                && money::differs(submitted, computed)
            {
                warn!(
                    target: "audit",
                    submitted_total = submitted,
                    recomputed_total = computed,
                    "Client sale total disagrees with line items, using recomputed total"
                );
            }
            computed
        };

        if let Some(vat) = payload.vat {
            validate_amount(vat, "vat")?;
        }
        let vat = resolve_vat(total, payload.vat);

        let presented_code = payload
            .discount_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());
        let (discount, discount_code) = match presented_code {
            Some(code) => {
                let found = self.discounts.resolve_code(code).await?;
                let outcome = apply_discount(total, &found, Some(code))?;
                (outcome.discount_amount, Some(normalize_code(code)))
            }
            None => {
                let amount = payload.discount_amount.unwrap_or(0.0);
                validate_amount(amount, "discountAmount")?;
                if amount > total && money::differs(amount, total) {
                    return Err(AppError::validation(format!(
                        "discountAmount {} exceeds total {}",
                        amount, total
                    ))
                    .with_detail("field", "discountAmount"));
                }
                (amount, None)
            }
        };

        let mut payments = Vec::with_capacity(payload.payments.len());
        for (i, input) in payload.payments.into_iter().enumerate() {
            payments.push(SalePayment {
                amount: validate_payment_amount(input.amount, &format!("payments[{i}].amount"))?,
                method: parse_method(input.method, &format!("payments[{i}].method"))?,
            });
        }

        if let Some(booking_id) = payload.booking_id
            && !self.bookings.exists(booking_id).await?
        {
            return Err(AppError::validation(format!(
                "Booking {} does not exist",
                booking_id
            ))
            .with_detail("bookingId", booking_id));
        }

        let settlement = reconcile_payments(total, vat, discount, payments.iter().map(|p| p.amount));
        let sale = Sale {
            id: snowflake_id(),
            items: payload.items,
            total,
            vat,
            discount,
            discount_code,
            paid: settlement.paid,
            payments,
            booking_id: payload.booking_id,
            settled: settlement.settled,
            outstanding: settlement.outstanding,
            created_at: now_millis(),
        };
        self.sales.create(&sale).await?;

        info!(
            sale_id = sale.id,
            total = sale.total,
            vat = sale.vat,
            discount = sale.discount,
            settled = sale.settled,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Current settlement of a sale: embedded payments plus ledger payments
    pub async fn settlement(&self, sale_id: i64) -> AppResult<Settlement> {
        let sale = self.get_sale(sale_id).await?;
        let recorded = self.payments.find_by_sale(sale_id).await?;
        Ok(reconcile_payments(
            sale.total,
            sale.vat,
            sale.discount,
            sale.payments
                .iter()
                .map(|p| p.amount)
                .chain(recorded.iter().map(|p| p.amount)),
        ))
    }

    // ========== Payments ==========

    pub async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        Ok(self.payments.find_all().await?)
    }

    /// Record a payment against an existing sale
    pub async fn create_payment(&self, payload: PaymentCreate) -> AppResult<Payment> {
        let sale_id = require(payload.sale_id, "saleId")?;
        if sale_id <= 0 {
            return Err(AppError::validation(format!("Invalid sale id: {}", sale_id))
                .with_detail("field", "saleId"));
        }
        let amount = validate_payment_amount(payload.amount, "amount")?;
        let method = parse_method(payload.method, "method")?;

        if self.sales.find_by_id(sale_id).await?.is_none() {
            return Err(AppError::validation(format!("Sale {} does not exist", sale_id))
                .with_detail("saleId", sale_id));
        }

        let payment = Payment {
            id: snowflake_id(),
            sale_id,
            amount,
            method,
            created_at: now_millis(),
        };
        self.payments.create(&payment).await?;

        info!(
            payment_id = payment.id,
            sale_id,
            amount,
            method = %method,
            "Payment recorded"
        );
        Ok(payment)
    }

    // ========== Finance ==========

    pub async fn finance_summary(&self) -> AppResult<FinanceSummary> {
        let sales = self.sales.find_all().await?;
        let payments = self.payments.find_all().await?;
        Ok(summarize(&sales, &payments))
    }
}
