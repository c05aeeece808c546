//! Change notifications for UI subscribers.
//!
//! The managers publish an [`Event`] after every successful persist. The
//! toast channel, heart-icon refresh, and the header cart badge subscribe
//! through an [`EventSink`]; persistence never calls into presentation
//! code directly.

/// A state change that UI layers may want to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new line item was appended to the cart.
    CartItemAdded { name: String },
    /// An existing line item absorbed a repeat add of the same identity.
    CartItemMerged { name: String },
    /// A line item quantity was set directly.
    CartQtyChanged { name: String, qty: u32 },
    /// A line item was removed.
    CartItemRemoved { name: String },
    /// The whole cart was emptied.
    CartCleared,
    /// A product was added to the wishlist.
    WishlistAdded { name: String },
    /// A product was removed from the wishlist.
    WishlistRemoved { name: String },
}

/// Fire-and-forget subscriber for [`Event`]s.
///
/// Sinks run inline inside the mutating call, so they should be cheap;
/// anything slow belongs behind a queue owned by the subscriber.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: Event);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: Event) {}
}

/// Sink that logs every event at `info`, standing in for the toast channel
/// in headless contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: Event) {
        match event {
            Event::CartItemAdded { name } => tracing::info!(%name, "added to cart"),
            Event::CartItemMerged { name } => tracing::info!(%name, "cart quantity updated"),
            Event::CartQtyChanged { name, qty } => {
                tracing::info!(%name, qty, "cart quantity set");
            }
            Event::CartItemRemoved { name } => tracing::info!(%name, "removed from cart"),
            Event::CartCleared => tracing::info!("cart cleared"),
            Event::WishlistAdded { name } => tracing::info!(%name, "added to wishlist"),
            Event::WishlistRemoved { name } => tracing::info!(%name, "removed from wishlist"),
        }
    }
}
