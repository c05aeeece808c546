//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod wishlist;

use elegance_storefront::cart::CartManager;
use elegance_storefront::config::StorefrontConfig;
use elegance_storefront::events::{EventSink, LogSink};
use elegance_storefront::store::FileStore;
use elegance_storefront::wishlist::WishlistManager;
use std::sync::Arc;

/// Open the persisted cart for this configuration, hydrated and wired to
/// the logging event sink.
pub(crate) fn open_cart(config: &StorefrontConfig) -> CartManager {
    let store = FileStore::new(&config.data_dir);
    let mut cart =
        CartManager::new(Box::new(store)).with_events(Arc::new(LogSink) as Arc<dyn EventSink>);
    cart.init();
    cart
}

/// Open the persisted wishlist, hydrated and wired to the logging sink.
pub(crate) fn open_wishlist(config: &StorefrontConfig) -> WishlistManager {
    let store = FileStore::new(&config.data_dir);
    let mut wishlist =
        WishlistManager::new(Box::new(store)).with_events(Arc::new(LogSink) as Arc<dyn EventSink>);
    wishlist.init();
    wishlist
}
