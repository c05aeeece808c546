//! Cart persistence over the real file-backed store.
//!
//! Each test gets its own temporary directory, so tests can run in
//! parallel without sharing state.

use elegance_integration_tests::draft;
use elegance_storefront::cart::{CART_KEY, CartManager};
use elegance_storefront::store::FileStore;

fn cart_in(dir: &std::path::Path) -> CartManager {
    let mut cart = CartManager::new(Box::new(FileStore::new(dir)));
    cart.init();
    cart
}

#[test]
fn cart_round_trips_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = cart_in(dir.path());
    cart.add_item(draft("p1", "Serum", 350.0, Some("30ml"), 2))
        .expect("add p1");
    cart.add_item(draft("p2", "Soap", 20.0, None, 1))
        .expect("add p2");
    cart.add_item(draft("p1", "Serum", 350.0, Some("30ml"), 1))
        .expect("merge p1");

    let reloaded = cart_in(dir.path());
    assert_eq!(reloaded.items(), cart.items());
    assert_eq!(reloaded.total_qty(), 4);
    assert!((reloaded.total_price() - (350.0 * 3.0 + 20.0)).abs() < 1e-9);
}

#[test]
fn removal_preserves_order_across_reload() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = cart_in(dir.path());
    for id in ["p1", "p2", "p3"] {
        cart.add_item(draft(id, id, 10.0, None, 1)).expect("add");
    }
    cart.remove_item(1).expect("remove middle row");

    let reloaded = cart_in(dir.path());
    let ids: Vec<&str> = reloaded.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}

#[test]
fn clear_deletes_the_document() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = cart_in(dir.path());
    cart.add_item(draft("p1", "Serum", 350.0, None, 1))
        .expect("add");
    assert!(dir.path().join(format!("{CART_KEY}.json")).exists());

    cart.clear().expect("clear");
    assert!(!dir.path().join(format!("{CART_KEY}.json")).exists());

    let reloaded = cart_in(dir.path());
    assert!(reloaded.items().is_empty());
}

#[test]
fn corrupt_document_hydrates_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(format!("{CART_KEY}.json")), "{{{ not json")
        .expect("seed corrupt file");

    let cart = cart_in(dir.path());
    assert!(cart.items().is_empty());
    assert_eq!(cart.total_qty(), 0);
}

#[test]
fn non_array_document_hydrates_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(format!("{CART_KEY}.json")),
        r#"{"id":"p1","qty":3}"#,
    )
    .expect("seed object file");

    let cart = cart_in(dir.path());
    assert!(cart.items().is_empty());
}

#[test]
fn persisted_document_keeps_the_record_shape() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = cart_in(dir.path());
    cart.add_item(draft("p1", "Serum", 350.0, Some("30ml"), 2))
        .expect("add");

    let raw = std::fs::read_to_string(dir.path().join(format!("{CART_KEY}.json")))
        .expect("read document");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse document");

    let first = value.get(0).expect("one row");
    assert_eq!(first.get("id").and_then(|v| v.as_str()), Some("p1"));
    assert_eq!(first.get("volume").and_then(|v| v.as_str()), Some("30ml"));
    assert_eq!(first.get("qty").and_then(serde_json::Value::as_u64), Some(2));
    assert!(first.get("image").is_some());
}
