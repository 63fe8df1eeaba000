mod common;

use common::{get, id_of, patch, post, send, test_app};
use http::StatusCode;
use serde_json::json;

// ========================================================================
// Discounts
// ========================================================================

#[tokio::test]
async fn test_discount_crud_and_renew() {
    let app = test_app();

    let (status, expired) = post(
        &app,
        "/api/discounts",
        json!({
            "name": "Winter",
            "percent": 10,
            "type": "CODE",
            "code": "winter",
            "expiresAt": "2020-01-01T00:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expired["active"], false);
    assert_eq!(expired["type"], "code");
    assert_eq!(expired["code"], "WINTER");
    let id = id_of(&expired);

    let (status, renewed) = patch(&app, &format!("/api/discounts/{id}/renew"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renewed["active"], true);
    assert!(renewed["expiresAt"].as_i64().unwrap() > shared::util::now_millis());

    let (status, replaced) = send(
        &app,
        "PUT",
        &format!("/api/discounts/{id}"),
        Some(json!({"name": "Staff", "amount": 2.5, "type": "static"})),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["type"], "static");
    assert_eq!(replaced["amount"], 2.5);
    assert!(replaced.get("code").is_none());
    assert!(replaced.get("expiresAt").is_none());
    assert_eq!(replaced["active"], true);

    let (status, edited) = patch(&app, &format!("/api/discounts/{id}"), json!({"name": "Crew"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["name"], "Crew");

    let (status, list) = get(&app, "/api/discounts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", &format!("/api/discounts/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, err) = get(&app, &format!("/api/discounts/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 6001);
}

#[tokio::test]
async fn test_discount_patch_clears_expiry() {
    let app = test_app();
    let expiry = shared::util::now_millis() + 86_400_000;

    let (status, created) = post(
        &app,
        "/api/discounts",
        json!({"name": "Weekend", "percent": 5, "type": "static", "expiresAt": expiry}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&created);

    let (status, renamed) =
        patch(&app, &format!("/api/discounts/{id}"), json!({"name": "Weekday"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["expiresAt"], expiry);

    let (status, cleared) =
        patch(&app, &format!("/api/discounts/{id}"), json!({"expiresAt": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared.get("expiresAt").is_none());
    assert_eq!(cleared["active"], true);

    let (_, stored) = get(&app, &format!("/api/discounts/{id}")).await;
    assert!(stored.get("expiresAt").is_none());
}

#[tokio::test]
async fn test_discount_validation() {
    let app = test_app();

    let (status, err) = post(
        &app,
        "/api/discounts",
        json!({"name": "No code", "percent": 5, "type": "code"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (status, err) = post(
        &app,
        "/api/discounts",
        json!({"name": "Odd", "percent": 5, "type": "voucher"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (status, _) = post(
        &app,
        "/api/discounts",
        json!({"name": "A", "percent": 5, "type": "code", "code": "DUP"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, err) = post(
        &app,
        "/api/discounts",
        json!({"name": "B", "percent": 7, "type": "code", "code": "dup"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 4);
}

// ========================================================================
// Sales & payments
// ========================================================================

#[tokio::test]
async fn test_sale_with_code_then_payment_settles() {
    let app = test_app();
    post(
        &app,
        "/api/discounts",
        json!({"name": "Ten", "percent": 10, "type": "code", "code": "TEN"}),
    )
    .await;

    let (status, sale) = post(
        &app,
        "/api/sales",
        json!({
            "items": [
                {"productId": 1, "name": "Burger", "quantity": 2, "unitPrice": 10.0}
            ],
            "discountCode": "ten",
            "payments": [{"amount": 10.0, "method": "cash"}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["total"], 20.0);
    assert_eq!(sale["vat"], 4.0);
    assert_eq!(sale["discount"], 2.0);
    assert_eq!(sale["paid"], 10.0);
    assert_eq!(sale["settled"], false);
    assert_eq!(sale["outstanding"], 12.0);
    let sale_id = id_of(&sale);

    let (status, payment) = post(
        &app,
        "/api/payments",
        json!({"saleId": sale_id, "amount": 12.0, "method": "card"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["saleId"], sale_id);

    let (status, settlement) = get(&app, &format!("/api/sales/{sale_id}/settlement")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        settlement,
        json!({"amountDue": 22.0, "paid": 22.0, "outstanding": 0.0, "settled": true})
    );

    let (status, summary) = get(&app, "/api/finance/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["saleCount"], 1);
    assert_eq!(summary["totalSales"], 20.0);
    assert_eq!(summary["totalPayments"], 12.0);
    assert_eq!(summary["outstanding"], 0.0);
}

#[tokio::test]
async fn test_offline_sale_keeps_supplied_vat() {
    let app = test_app();
    let (status, sale) = post(
        &app,
        "/api/sales",
        json!({"total": 100.0, "vat": 5.0, "discountAmount": 10.0, "payments": []}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["vat"], 5.0);
    assert_eq!(sale["discount"], 10.0);
    assert_eq!(sale["outstanding"], 95.0);

    let (_, fetched) = get(&app, &format!("/api/sales/{}", id_of(&sale))).await;
    assert_eq!(fetched["total"], 100.0);
}

#[tokio::test]
async fn test_sale_and_payment_errors() {
    let app = test_app();

    let (status, err) = post(&app, "/api/sales", json!({"discountCode": "NOPE", "total": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 6002);

    let (status, err) = post(
        &app,
        "/api/sales",
        json!({"total": 5, "payments": [{"amount": 5, "method": "cheque"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 5002);

    let (status, err) = post(
        &app,
        "/api/payments",
        json!({"saleId": 777, "amount": 5, "method": "cash"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (status, err) = get(&app, "/api/sales/777").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 5001);

    let (_, payments) = get(&app, "/api/payments").await;
    assert!(payments.as_array().unwrap().is_empty());
}

// ========================================================================
// Health
// ========================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
