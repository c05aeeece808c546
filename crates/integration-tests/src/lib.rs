//! Integration tests for the Elegance storefront client.
//!
//! These tests exercise the real file-backed store in temporary
//! directories; no network or running services are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p elegance-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use elegance_storefront::cart::CartItemDraft;

/// Build a cart draft with the fields every test cares about.
#[must_use]
pub fn draft(id: &str, name: &str, price: f64, volume: Option<&str>, qty: u32) -> CartItemDraft {
    CartItemDraft {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
        volume: volume.map(str::to_owned),
        qty: Some(qty),
        ..CartItemDraft::default()
    }
}
