use super::*;
use crate::bookings::BookingManager;
use crate::db::{MemoryStore, StoreHandle};
use crate::discounts::DiscountDirectory;
use crate::utils::ErrorCode;
use shared::models::{
    BookingCreate, DiscountCreate, PaymentCreate, SaleCreate, SaleItem, SalePaymentInput,
};
use shared::util::now_millis;
use std::sync::Arc;

struct Fixture {
    ledger: SaleLedger,
    discounts: DiscountDirectory,
    bookings: BookingManager,
}

fn create_test_ledger() -> Fixture {
    let store: StoreHandle = Arc::new(MemoryStore::new());
    let discounts = DiscountDirectory::new(store.clone());
    let bookings = BookingManager::new(store.clone());
    Fixture {
        ledger: SaleLedger::new(store, discounts.clone(), bookings.clone()),
        discounts,
        bookings,
    }
}

fn sale_item(name: &str, quantity: i32, unit_price: f64) -> SaleItem {
    SaleItem {
        product_id: Some(1),
        name: name.to_string(),
        quantity,
        unit_price,
    }
}

fn pay(amount: f64, method: &str) -> SalePaymentInput {
    SalePaymentInput {
        amount: Some(amount),
        method: Some(method.to_string()),
    }
}

fn ten_pound_sale() -> SaleCreate {
    SaleCreate {
        items: vec![sale_item("Burger", 1, 8.0), sale_item("Soda", 1, 2.0)],
        ..Default::default()
    }
}

// ========================================================================
// Sales
// ========================================================================

#[tokio::test]
async fn test_sale_computes_total_and_vat() {
    let fx = create_test_ledger();
    let mut payload = ten_pound_sale();
    payload.payments = vec![pay(12.0, "card")];

    let sale = fx.ledger.create_sale(payload).await.unwrap();
    assert_eq!(sale.total, 10.0);
    assert_eq!(sale.vat, 2.0);
    assert_eq!(sale.discount, 0.0);
    assert_eq!(sale.paid, 12.0);
    assert!(sale.settled);
    assert_eq!(sale.outstanding, 0.0);

    let stored = fx.ledger.get_sale(sale.id).await.unwrap();
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.items[0].name, "Burger");
}

#[tokio::test]
async fn test_supplied_vat_is_authoritative() {
    let fx = create_test_ledger();
    let mut payload = ten_pound_sale();
    payload.vat = Some(1.5);
    assert_eq!(fx.ledger.create_sale(payload).await.unwrap().vat, 1.5);

    let mut payload = ten_pound_sale();
    payload.vat = Some(0.0);
    assert_eq!(fx.ledger.create_sale(payload).await.unwrap().vat, 2.0);
}

#[tokio::test]
async fn test_offline_sale_requires_total() {
    let fx = create_test_ledger();
    let err = fx.ledger.create_sale(SaleCreate::default()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let sale = fx
        .ledger
        .create_sale(SaleCreate {
            total: Some(50.0),
            vat: Some(10.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sale.total, 50.0);
    assert_eq!(sale.vat, 10.0);
    assert!(!sale.settled);
    assert_eq!(sale.outstanding, 60.0);
}

#[tokio::test]
async fn test_partial_payment_is_accepted() {
    let fx = create_test_ledger();
    let mut payload = ten_pound_sale();
    payload.payments = vec![pay(5.0, "cash")];

    let sale = fx.ledger.create_sale(payload).await.unwrap();
    assert!(!sale.settled);
    assert_eq!(sale.outstanding, 7.0);
}

#[tokio::test]
async fn test_sale_with_discount_code() {
    let fx = create_test_ledger();
    fx.discounts
        .create(DiscountCreate {
            name: Some("Tenner".into()),
            percent: Some(10.0),
            discount_type: Some("code".into()),
            code: Some("TEN".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut payload = ten_pound_sale();
    payload.discount_code = Some("ten".into());
    payload.payments = vec![pay(11.0, "online")];

    let sale = fx.ledger.create_sale(payload).await.unwrap();
    assert_eq!(sale.discount, 1.0);
    assert_eq!(sale.discount_code.as_deref(), Some("TEN"));
    assert!(sale.settled);
}

#[tokio::test]
async fn test_sale_with_expired_or_unknown_code() {
    let fx = create_test_ledger();
    fx.discounts
        .create(DiscountCreate {
            name: Some("Old".into()),
            amount: Some(2.0),
            discount_type: Some("code".into()),
            code: Some("OLD".into()),
            expires_at: Some(now_millis() - 1000),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut payload = ten_pound_sale();
    payload.discount_code = Some("OLD".into());
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DiscountExpired);

    let mut payload = ten_pound_sale();
    payload.discount_code = Some("MISSING".into());
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DiscountInvalid);

    assert!(fx.ledger.list_sales().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sale_rejects_bad_input() {
    let fx = create_test_ledger();

    let mut payload = ten_pound_sale();
    payload.payments = vec![pay(5.0, "voucher")];
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentInvalidMethod);

    let mut payload = ten_pound_sale();
    payload.payments = vec![pay(0.0, "cash")];
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let mut payload = ten_pound_sale();
    payload.discount_amount = Some(15.0);
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let mut payload = ten_pound_sale();
    payload.booking_id = Some(987654321);
    let err = fx.ledger.create_sale(payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_sale_linked_to_booking() {
    let fx = create_test_ledger();
    let booking = fx
        .bookings
        .create(BookingCreate {
            customer_id: Some(1),
            table_number: Some("T1".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut payload = ten_pound_sale();
    payload.booking_id = Some(booking.id);
    let sale = fx.ledger.create_sale(payload).await.unwrap();
    assert_eq!(sale.booking_id, Some(booking.id));
}

// ========================================================================
// Payments & settlement
// ========================================================================

#[tokio::test]
async fn test_payment_requires_existing_sale() {
    let fx = create_test_ledger();
    let err = fx
        .ledger
        .create_payment(PaymentCreate {
            sale_id: Some(42),
            amount: Some(5.0),
            method: Some("cash".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(fx.ledger.list_payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ledger_payments_settle_sale() {
    let fx = create_test_ledger();
    let mut payload = ten_pound_sale();
    payload.payments = vec![pay(4.0, "cash")];
    let sale = fx.ledger.create_sale(payload).await.unwrap();

    let before = fx.ledger.settlement(sale.id).await.unwrap();
    assert!(!before.settled);
    assert_eq!(before.outstanding, 8.0);

    fx.ledger
        .create_payment(PaymentCreate {
            sale_id: Some(sale.id),
            amount: Some(8.0),
            method: Some("Card".into()),
        })
        .await
        .unwrap();

    let after = fx.ledger.settlement(sale.id).await.unwrap();
    assert!(after.settled);
    assert_eq!(after.paid, 12.0);

    // The sale itself is never rewritten
    assert!(!fx.ledger.get_sale(sale.id).await.unwrap().settled);
}

#[tokio::test]
async fn test_settlement_of_missing_sale() {
    let fx = create_test_ledger();
    let err = fx.ledger.settlement(7).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SaleNotFound);
}

// ========================================================================
// Finance summary
// ========================================================================

#[tokio::test]
async fn test_finance_summary() {
    let fx = create_test_ledger();

    let mut first = ten_pound_sale();
    first.payments = vec![pay(12.0, "card")];
    fx.ledger.create_sale(first).await.unwrap();

    let mut second = ten_pound_sale();
    second.discount_amount = Some(2.0);
    second.payments = vec![pay(5.0, "cash")];
    let second = fx.ledger.create_sale(second).await.unwrap();

    fx.ledger
        .create_payment(PaymentCreate {
            sale_id: Some(second.id),
            amount: Some(3.0),
            method: Some("cash".into()),
        })
        .await
        .unwrap();

    let summary = fx.ledger.finance_summary().await.unwrap();
    assert_eq!(summary.sale_count, 2);
    assert_eq!(summary.total_sales, 20.0);
    assert_eq!(summary.total_vat, 4.0);
    assert_eq!(summary.total_discounts, 2.0);
    assert_eq!(summary.total_paid, 17.0);
    assert_eq!(summary.total_payments, 3.0);
    // second sale: 10 + 2 - 2 = 10 due, 8 paid
    assert_eq!(summary.outstanding, 2.0);
}

#[test]
fn test_summarize_empty_ledger() {
    let summary = summarize(&[], &[]);
    assert_eq!(summary.sale_count, 0);
    assert_eq!(summary.outstanding, 0.0);
}
