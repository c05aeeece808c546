//! The cart-to-order path: fill a cart, validate checkout details, build
//! the order payload, then clear the cart as the caller does after a
//! successful submission.

use elegance_integration_tests::draft;
use elegance_storefront::cart::CartManager;
use elegance_storefront::orders::{CheckoutDetails, CheckoutError, OrderDraft};
use elegance_storefront::store::FileStore;

#[test]
fn order_payload_carries_the_cart_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cart = CartManager::new(Box::new(FileStore::new(dir.path())));
    cart.init();
    cart.add_item(draft("p1", "Serum", 350.0, Some("30ml"), 2))
        .expect("add p1");
    cart.add_item(draft("p2", "Soap", 20.0, None, 3))
        .expect("add p2");

    let details = CheckoutDetails::parse(
        "Sara Ahmed",
        "sara@example.com",
        "01099998888",
        "12 Nile St, Cairo",
    )
    .expect("valid details");

    let order = OrderDraft::from_cart(details, &cart);
    assert_eq!(order.items.len(), 2);
    assert!((order.total - (350.0 * 2.0 + 20.0 * 3.0)).abs() < 1e-9);

    let payload = serde_json::to_value(&order).expect("serialize payload");
    assert_eq!(
        payload.get("customerName").and_then(|v| v.as_str()),
        Some("Sara Ahmed")
    );
    assert_eq!(
        payload.get("status").and_then(|v| v.as_str()),
        Some("pending")
    );
    let items = payload.get("items").and_then(|v| v.as_array()).expect("items");
    assert_eq!(items.len(), 2);

    // After a successful submission the caller clears the cart; a fresh
    // session must then see an empty one.
    cart.clear().expect("clear after submit");
    let mut fresh = CartManager::new(Box::new(FileStore::new(dir.path())));
    fresh.init();
    assert!(fresh.items().is_empty());
}

#[test]
fn invalid_checkout_details_never_build_a_payload() {
    assert!(matches!(
        CheckoutDetails::parse("Sara", "sara@nodot", "0109", "Cairo"),
        Err(CheckoutError::InvalidEmail(_))
    ));
    assert!(matches!(
        CheckoutDetails::parse("Sara", "sara@example.com", "   ", "Cairo"),
        Err(CheckoutError::MissingPhone)
    ));
}
