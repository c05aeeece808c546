//! Elegance Storefront client core.
//!
//! The browser-facing half of the Elegance pharmacy store as a library:
//! cart and wishlist state with durable persistence, plus the REST boundary
//! clients (catalog, orders) the UI layers consume.
//!
//! # Architecture
//!
//! - [`cart`] and [`wishlist`] managers own in-memory state and persist
//!   through the [`store::Store`] adapter after every successful mutation.
//!   A failed write rolls the mutation back, so memory never diverges from
//!   storage.
//! - UI concerns (toasts, heart icons, the header badge) subscribe to
//!   [`events`] instead of being called from inside the data layer.
//! - [`catalog`] and [`orders`] are async `reqwest` clients, independent of
//!   manager state.
//!
//! # Example
//!
//! ```
//! use elegance_storefront::cart::{CartItemDraft, CartManager};
//! use elegance_storefront::store::MemoryStore;
//!
//! let mut cart = CartManager::new(Box::new(MemoryStore::new()));
//! cart.init();
//! cart.add_item(CartItemDraft {
//!     id: "prod-42".into(),
//!     name: "Vitamin C Serum".into(),
//!     price: 350.0,
//!     volume: Some("30ml".into()),
//!     ..CartItemDraft::default()
//! })?;
//! assert_eq!(cart.total_qty(), 1);
//! # Ok::<(), elegance_storefront::cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod events;
pub mod orders;
pub mod pricing;
pub mod store;
pub mod wishlist;
