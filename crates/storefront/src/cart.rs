//! Cart state management with durable persistence.
//!
//! The cart is an ordered list of line items for one session. Every
//! mutation persists through the injected [`Store`]; a failed write rolls
//! the in-memory change back, so memory and storage never diverge.
//!
//! Rows are keyed by product id plus normalized volume: adding the same
//! identity twice bumps the existing row's quantity instead of creating a
//! duplicate, while distinct volumes of one product coexist as separate
//! rows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use elegance_core::{LineKey, ProductId};

use crate::events::{Event, EventSink, NullSink};
use crate::store::{self, Store, StoreError};

/// Storage namespace for the persisted cart.
pub const CART_KEY: &str = "elegance_cart_v1";

/// Image shown for items that carry no image reference.
pub const PLACEHOLDER_IMAGE: &str = "assets/bottle.svg";

/// One row of the cart: a product variant and its quantity.
///
/// `name`, `price`, and `image` are display snapshots captured at add
/// time; a later catalog price change does not touch rows already in the
/// cart, and any discount is already baked into the snapshot price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    pub qty: u32,
    pub image: String,
}

impl CartLineItem {
    /// Identity key deciding which additions merge into this row.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.volume.as_deref())
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// Input for [`CartManager::add_item`].
///
/// Validation and coercion happen once here, at the boundary: price is
/// clamped to a finite non-negative number, a missing or zero quantity
/// means one, and a missing image falls back to [`PLACEHOLDER_IMAGE`].
#[derive(Debug, Clone, Default)]
pub struct CartItemDraft {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub volume: Option<String>,
    /// Requested quantity; `None` and `Some(0)` both mean 1.
    pub qty: Option<u32>,
    pub image: Option<String>,
}

impl CartItemDraft {
    fn into_line_item(self) -> Result<CartLineItem, CartError> {
        if self.id.trim().is_empty() {
            return Err(CartError::MissingProductId);
        }

        let price = if self.price.is_finite() {
            self.price.max(0.0)
        } else {
            0.0
        };

        Ok(CartLineItem {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            volume: self.volume.filter(|v| !v.trim().is_empty()),
            qty: self.qty.unwrap_or(1).max(1),
            image: self
                .image
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
        })
    }
}

/// Outcome of a successful [`CartManager::add_item`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended.
    Added,
    /// An existing row with the same identity key absorbed the quantity.
    Merged,
}

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// `init` has not run; mutating now could clobber persisted state.
    #[error("cart manager is not initialized")]
    Uninitialized,

    /// The draft carried no product id.
    #[error("cart item is missing a product id")]
    MissingProductId,

    /// No line item at the given index.
    #[error("no cart item at index {index} (cart has {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The substrate rejected the write; the in-memory change was rolled
    /// back.
    #[error("cart persistence failed: {0}")]
    Persist(#[from] StoreError),
}

/// Cart state manager.
///
/// Construct with [`CartManager::new`], call [`CartManager::init`] once at
/// startup, then mutate. Mutators refuse to run before `init`, so a first
/// save can never overwrite a persisted cart that was never loaded.
pub struct CartManager {
    store: Box<dyn Store>,
    events: Arc<dyn EventSink>,
    items: Option<Vec<CartLineItem>>,
}

impl CartManager {
    #[must_use]
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store,
            events: Arc::new(NullSink),
            items: None,
        }
    }

    /// Attach a subscriber for change events.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Hydrate state from the store.
    ///
    /// Anything other than a well-formed array of line items (missing key,
    /// corrupt JSON, wrong shape) coerces to an empty cart. Calling again
    /// re-hydrates and discards unpersisted in-memory changes.
    pub fn init(&mut self) {
        self.items = Some(store::read_collection(self.store.as_ref(), CART_KEY));
    }

    /// Line items in insertion order; empty before `init`.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Index of the row matching the `(id, volume)` identity, if any.
    #[must_use]
    pub fn find_item(&self, id: &str, volume: Option<&str>) -> Option<usize> {
        let key = LineKey::new(ProductId::new(id), volume);
        self.items().iter().position(|item| item.key() == key)
    }

    /// Add a product to the cart, merging with an existing row when the
    /// identity key matches.
    ///
    /// # Errors
    ///
    /// [`CartError::MissingProductId`] for id-less drafts,
    /// [`CartError::Uninitialized`] before `init`, and
    /// [`CartError::Persist`] when the write fails (state rolled back).
    pub fn add_item(&mut self, draft: CartItemDraft) -> Result<AddOutcome, CartError> {
        let line = draft.into_line_item()?;
        let items = self.items.as_mut().ok_or(CartError::Uninitialized)?;
        let snapshot = items.clone();
        let key = line.key();

        let (outcome, name) = match items.iter_mut().find(|item| item.key() == key) {
            Some(existing) => {
                existing.qty = existing.qty.saturating_add(line.qty);
                (AddOutcome::Merged, existing.name.clone())
            }
            None => {
                let name = line.name.clone();
                items.push(line);
                (AddOutcome::Added, name)
            }
        };

        self.persist(snapshot)?;
        self.events.publish(match outcome {
            AddOutcome::Added => Event::CartItemAdded { name },
            AddOutcome::Merged => Event::CartItemMerged { name },
        });
        Ok(outcome)
    }

    /// Set the quantity of the row at `index`, clamped to a minimum of 1.
    ///
    /// # Errors
    ///
    /// [`CartError::IndexOutOfBounds`] for a missing row,
    /// [`CartError::Uninitialized`] before `init`, and
    /// [`CartError::Persist`] when the write fails (state rolled back).
    pub fn update_qty(&mut self, index: usize, qty: u32) -> Result<(), CartError> {
        let items = self.items.as_mut().ok_or(CartError::Uninitialized)?;
        let len = items.len();
        let snapshot = items.clone();

        let item = items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfBounds { index, len })?;
        item.qty = qty.max(1);
        let (name, qty) = (item.name.clone(), item.qty);

        self.persist(snapshot)?;
        self.events.publish(Event::CartQtyChanged { name, qty });
        Ok(())
    }

    /// Remove the row at `index`.
    ///
    /// # Errors
    ///
    /// Same contract as [`CartManager::update_qty`].
    pub fn remove_item(&mut self, index: usize) -> Result<(), CartError> {
        let items = self.items.as_mut().ok_or(CartError::Uninitialized)?;
        if index >= items.len() {
            return Err(CartError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }

        let snapshot = items.clone();
        let removed = items.remove(index);

        self.persist(snapshot)?;
        self.events
            .publish(Event::CartItemRemoved { name: removed.name });
        Ok(())
    }

    /// Sum of all quantities (the header badge number).
    #[must_use]
    pub fn total_qty(&self) -> u32 {
        self.items().iter().map(|item| item.qty).sum()
    }

    /// Sum of price times quantity across all rows.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items().iter().map(CartLineItem::line_total).sum()
    }

    /// Empty the cart and delete its storage key.
    ///
    /// # Errors
    ///
    /// [`CartError::Uninitialized`] before `init`, [`CartError::Persist`]
    /// when the key removal fails (state rolled back).
    pub fn clear(&mut self) -> Result<(), CartError> {
        let items = self.items.as_mut().ok_or(CartError::Uninitialized)?;
        let snapshot = std::mem::take(items);

        if let Err(e) = self.store.remove(CART_KEY) {
            self.items = Some(snapshot);
            return Err(e.into());
        }

        self.events.publish(Event::CartCleared);
        Ok(())
    }

    fn persist(&mut self, rollback: Vec<CartLineItem>) -> Result<(), CartError> {
        let value = match serde_json::to_value(self.items()) {
            Ok(value) => value,
            Err(e) => {
                self.items = Some(rollback);
                return Err(CartError::Persist(StoreError::Serialize {
                    key: CART_KEY.to_owned(),
                    message: e.to_string(),
                }));
            }
        };

        if let Err(e) = self.store.write(CART_KEY, &value) {
            self.items = Some(rollback);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Mutex;

    struct RecordingSink(Mutex<Vec<Event>>);

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }

        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn publish(&self, event: Event) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn draft(id: &str, volume: Option<&str>) -> CartItemDraft {
        CartItemDraft {
            id: id.to_owned(),
            name: format!("Product {id}"),
            price: 100.0,
            volume: volume.map(str::to_owned),
            ..CartItemDraft::default()
        }
    }

    fn ready_cart() -> (CartManager, MemoryStore) {
        let store = MemoryStore::new();
        let mut cart = CartManager::new(Box::new(store.clone()));
        cart.init();
        (cart, store)
    }

    #[test]
    fn test_repeat_add_merges_into_one_row() {
        let (mut cart, _store) = ready_cart();

        assert_eq!(cart.add_item(draft("p1", Some("50ml"))).unwrap(), AddOutcome::Added);
        assert_eq!(cart.add_item(draft("p1", Some("50ml"))).unwrap(), AddOutcome::Merged);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().qty, 2);
    }

    #[test]
    fn test_missing_and_empty_volume_merge() {
        let (mut cart, _store) = ready_cart();

        cart.add_item(draft("p1", None)).unwrap();
        assert_eq!(cart.add_item(draft("p1", Some(""))).unwrap(), AddOutcome::Merged);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_distinct_volumes_coexist() {
        let (mut cart, _store) = ready_cart();

        cart.add_item(draft("p1", Some("50ml"))).unwrap();
        cart.add_item(draft("p1", Some("100ml"))).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.find_item("p1", Some("100ml")), Some(1));
    }

    #[test]
    fn test_missing_id_rejected() {
        let (mut cart, store) = ready_cart();

        let result = cart.add_item(draft("", None));
        assert!(matches!(result, Err(CartError::MissingProductId)));
        assert!(store.read(CART_KEY).is_none());
    }

    #[test]
    fn test_draft_coercions() {
        let (mut cart, _store) = ready_cart();

        cart.add_item(CartItemDraft {
            id: "p1".to_owned(),
            name: "Cough Syrup".to_owned(),
            price: -3.0,
            qty: Some(0),
            ..CartItemDraft::default()
        })
        .unwrap();

        let item = cart.items().first().unwrap();
        assert!((item.price - 0.0).abs() < f64::EPSILON);
        assert_eq!(item.qty, 1);
        assert_eq!(item.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_qty_floor() {
        let (mut cart, _store) = ready_cart();
        cart.add_item(draft("p1", None)).unwrap();

        cart.update_qty(0, 0).unwrap();
        assert_eq!(cart.items().first().unwrap().qty, 1);

        cart.update_qty(0, 5).unwrap();
        assert_eq!(cart.items().first().unwrap().qty, 5);
    }

    #[test]
    fn test_index_out_of_bounds() {
        let (mut cart, _store) = ready_cart();

        assert!(matches!(
            cart.update_qty(0, 2),
            Err(CartError::IndexOutOfBounds { index: 0, len: 0 })
        ));
        assert!(matches!(
            cart.remove_item(3),
            Err(CartError::IndexOutOfBounds { index: 3, len: 0 })
        ));
    }

    #[test]
    fn test_totals() {
        let (mut cart, _store) = ready_cart();

        cart.add_item(CartItemDraft {
            id: "p1".to_owned(),
            name: "A".to_owned(),
            price: 10.0,
            qty: Some(2),
            ..CartItemDraft::default()
        })
        .unwrap();
        cart.add_item(CartItemDraft {
            id: "p2".to_owned(),
            name: "B".to_owned(),
            price: 5.0,
            qty: Some(3),
            ..CartItemDraft::default()
        })
        .unwrap();

        assert_eq!(cart.total_qty(), 5);
        assert!((cart.total_price() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let (cart, _store) = ready_cart();
        assert_eq!(cart.total_qty(), 0);
        assert!(cart.total_price().abs() < f64::EPSILON);
    }

    #[test]
    fn test_persistence_round_trip() {
        let (mut cart, store) = ready_cart();
        cart.add_item(draft("p1", Some("50ml"))).unwrap();
        cart.add_item(draft("p2", None)).unwrap();

        let mut reloaded = CartManager::new(Box::new(store));
        reloaded.init();
        assert_eq!(reloaded.items(), cart.items());
    }

    #[test]
    fn test_clear_removes_the_key() {
        let (mut cart, store) = ready_cart();
        cart.add_item(draft("p1", None)).unwrap();

        cart.clear().unwrap();
        assert!(cart.items().is_empty());
        assert!(store.read(CART_KEY).is_none());

        let mut reloaded = CartManager::new(Box::new(store));
        reloaded.init();
        assert!(reloaded.items().is_empty());
    }

    #[test]
    fn test_corrupt_storage_hydrates_empty() {
        let store = MemoryStore::new();
        store
            .write(CART_KEY, &serde_json::json!({"id": "not-an-array"}))
            .unwrap();

        let mut cart = CartManager::new(Box::new(store));
        cart.init();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_mutation_before_init_fails_and_preserves_storage() {
        let store = MemoryStore::new();
        store
            .write(CART_KEY, &serde_json::json!([{"id": "p1", "name": "A", "price": 1.0, "qty": 1, "image": "x"}]))
            .unwrap();

        let mut cart = CartManager::new(Box::new(store.clone()));
        assert!(matches!(
            cart.add_item(draft("p2", None)),
            Err(CartError::Uninitialized)
        ));

        // The persisted cart is untouched by the failed call.
        let mut reloaded = CartManager::new(Box::new(store));
        reloaded.init();
        assert_eq!(reloaded.items().len(), 1);
    }

    #[test]
    fn test_persist_failure_rolls_back() {
        let (mut cart, store) = ready_cart();
        cart.add_item(draft("p1", None)).unwrap();

        store.set_fail_writes(true);
        assert!(matches!(
            cart.add_item(draft("p2", None)),
            Err(CartError::Persist(_))
        ));

        // Memory still matches the last successful persist.
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_qty(), 1);
    }

    #[test]
    fn test_events_fire_after_successful_persist_only() {
        let sink = RecordingSink::new();
        let store = MemoryStore::new();
        let mut cart = CartManager::new(Box::new(store.clone()))
            .with_events(Arc::clone(&sink) as Arc<dyn EventSink>);
        cart.init();

        cart.add_item(draft("p1", None)).unwrap();
        cart.add_item(draft("p1", None)).unwrap();

        store.set_fail_writes(true);
        let _ = cart.add_item(draft("p2", None));

        assert_eq!(
            sink.events(),
            vec![
                Event::CartItemAdded {
                    name: "Product p1".to_owned()
                },
                Event::CartItemMerged {
                    name: "Product p1".to_owned()
                },
            ]
        );
    }
}
