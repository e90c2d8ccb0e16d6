use interactor_rust::checkout;
use interactor_rust::AppError;
use serde_json::json;

#[test]
fn facade_returns_receipt_on_success() {
    let receipt = checkout::place_order(json!({
        "items": [{ "sku": "apple", "quantity": 2, "unit_price_cents": 3000 }],
        "currency": "USD",
    })).expect("order confirmed");
    // 6000 >= envío gratis
    assert_eq!(receipt.total_cents, 6000);
    assert_eq!(receipt.currency, "USD");
}

#[test]
fn facade_maps_business_failures_to_rejections() {
    let err = checkout::place_order(json!({
        "items": [{ "sku": "pear", "quantity": 1, "unit_price_cents": 250 }],
        "warehouse": "outlet",
    })).unwrap_err();
    assert!(matches!(err, AppError::Rejected(ref msg) if msg == "out of stock: pear"));
}

#[test]
fn facade_propagates_unhandled_errors() {
    let err = checkout::place_order(json!({
        "items": [{ "sku": "apple", "quantity": 1, "unit_price_cents": 100 }],
        "payment_method": "gateway_down",
    })).unwrap_err();
    assert!(matches!(err, AppError::Interactor(_)));
}
