//! Wishlist (favorites) state management.
//!
//! Membership is a set over product ids: a product is in the wishlist at
//! most once, and repeat adds are no-ops rather than errors. Insertion
//! order is kept for display but carries no meaning. Persistence follows
//! the cart's contract: every successful mutation is written through the
//! injected [`Store`], and a failed write rolls the change back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use elegance_core::ProductId;

use crate::catalog::Product;
use crate::events::{Event, EventSink, NullSink};
use crate::store::{self, Store, StoreError};

/// Storage namespace for the persisted wishlist.
pub const WISHLIST_KEY: &str = "elegance_wishlist_v1";

/// A favorited product: display snapshots plus the insertion timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_volume: String,
    pub added_at: DateTime<Utc>,
}

/// What a wishlist mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    /// The product became a member.
    Added,
    /// The product already was a member; nothing changed.
    AlreadyPresent,
    /// The product stopped being a member.
    Removed,
    /// The product was not a member; nothing changed.
    NotPresent,
}

impl WishlistChange {
    /// True when the call mutated (and persisted) state.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Errors from wishlist operations.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// `init` has not run; mutating now could clobber persisted state.
    #[error("wishlist manager is not initialized")]
    Uninitialized,

    /// The substrate rejected the write; the in-memory change was rolled
    /// back.
    #[error("wishlist persistence failed: {0}")]
    Persist(#[from] StoreError),
}

/// Wishlist state manager.
///
/// Same lifecycle as the cart manager: construct, [`init`](Self::init)
/// once, then mutate. Mutators fail fast before `init`.
pub struct WishlistManager {
    store: Box<dyn Store>,
    events: Arc<dyn EventSink>,
    entries: Option<Vec<WishlistEntry>>,
}

impl WishlistManager {
    #[must_use]
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store,
            events: Arc::new(NullSink),
            entries: None,
        }
    }

    /// Attach a subscriber for change events.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Hydrate state from the store; invalid stored data coerces to an
    /// empty wishlist. Calling again re-hydrates.
    pub fn init(&mut self) {
        self.entries = Some(store::read_collection(self.store.as_ref(), WISHLIST_KEY));
    }

    /// Entries in insertion order; empty before `init`.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Membership test by product id.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.id.as_str() == product_id)
    }

    /// Add a product snapshot to the wishlist.
    ///
    /// A product that is already a member is left alone and reported as
    /// [`WishlistChange::AlreadyPresent`].
    ///
    /// # Errors
    ///
    /// [`WishlistError::Uninitialized`] before `init`,
    /// [`WishlistError::Persist`] when the write fails (state rolled back).
    pub fn add(&mut self, product: &Product) -> Result<WishlistChange, WishlistError> {
        let entries = self.entries.as_mut().ok_or(WishlistError::Uninitialized)?;
        if entries.iter().any(|entry| entry.id == product.id) {
            return Ok(WishlistChange::AlreadyPresent);
        }

        let snapshot = entries.clone();
        entries.push(WishlistEntry {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            tagline: product.tagline.clone(),
            category: product.category.clone(),
            default_volume: product.default_volume.clone(),
            added_at: Utc::now(),
        });

        self.persist(snapshot)?;
        self.events.publish(Event::WishlistAdded {
            name: product.name.clone(),
        });
        Ok(WishlistChange::Added)
    }

    /// Remove a product by id.
    ///
    /// A product that is not a member is reported as
    /// [`WishlistChange::NotPresent`].
    ///
    /// # Errors
    ///
    /// Same contract as [`WishlistManager::add`].
    pub fn remove(&mut self, product_id: &str) -> Result<WishlistChange, WishlistError> {
        let entries = self.entries.as_mut().ok_or(WishlistError::Uninitialized)?;
        let Some(pos) = entries
            .iter()
            .position(|entry| entry.id.as_str() == product_id)
        else {
            return Ok(WishlistChange::NotPresent);
        };

        let snapshot = entries.clone();
        let removed = entries.remove(pos);

        self.persist(snapshot)?;
        self.events
            .publish(Event::WishlistRemoved { name: removed.name });
        Ok(WishlistChange::Removed)
    }

    /// Toggle membership; the primary entry point for a heart-icon click.
    ///
    /// Returns the membership state after the call: `true` when the
    /// product was just added, `false` when it was just removed.
    ///
    /// # Errors
    ///
    /// Same contract as [`WishlistManager::add`].
    pub fn toggle(&mut self, product_id: &str, product: &Product) -> Result<bool, WishlistError> {
        if self.contains(product_id) {
            self.remove(product_id)?;
            Ok(false)
        } else {
            self.add(product)?;
            Ok(true)
        }
    }

    fn persist(&mut self, rollback: Vec<WishlistEntry>) -> Result<(), WishlistError> {
        let value = match serde_json::to_value(self.entries()) {
            Ok(value) => value,
            Err(e) => {
                self.entries = Some(rollback);
                return Err(WishlistError::Persist(StoreError::Serialize {
                    key: WISHLIST_KEY.to_owned(),
                    message: e.to_string(),
                }));
            }
        };

        if let Err(e) = self.store.write(WISHLIST_KEY, &value) {
            self.entries = Some(rollback);
            return Err(e.into());
        }
        Ok(())
    }
}
