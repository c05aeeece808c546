//! Durable key-value JSON persistence.
//!
//! Cart and wishlist state survives restarts through a small keyed JSON
//! substrate. Managers read and write whole collections under a fixed
//! namespace key; nothing in this module knows about cart or wishlist
//! shapes.
//!
//! All operations are synchronous and never panic: read failures collapse
//! to `None`, write failures surface as [`StoreError`] after being logged.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when persisting to the substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The substrate rejected the operation (I/O failure, quota,
    /// permissions, malformed key).
    #[error("storage error for key \"{key}\": {message}")]
    Substrate { key: String, message: String },

    /// The value could not be serialized to JSON.
    #[error("serialization error for key \"{key}\": {message}")]
    Serialize { key: String, message: String },
}

/// Synchronous keyed JSON persistence.
///
/// Implementations must never unwind into the caller: a broken substrate
/// produces `None` or an error value, not a panic.
pub trait Store {
    /// Read and deserialize the value stored under `key`.
    ///
    /// Returns `None` on a missing key, invalid JSON, or any substrate
    /// error; failures are logged, not surfaced.
    fn read(&self, key: &str) -> Option<Value>;

    /// Serialize and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the substrate rejects the write (e.g.
    /// quota exceeded or an unwritable directory).
    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Delete `key`. Removing a key that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the substrate fails to delete.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Hydrate a persisted collection.
///
/// Anything other than a well-formed JSON array of `T` (missing key,
/// corrupt document, wrong shape) coerces to an empty collection. Never
/// fails: a damaged store costs the user their cart, not the session.
pub(crate) fn read_collection<T: serde::de::DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Vec<T> {
    match store.read(key) {
        Some(value) if value.is_array() => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "stored collection is malformed, starting empty");
            Vec::new()
        }),
        Some(_) => {
            tracing::warn!(key, "stored value is not an array, starting empty");
            Vec::new()
        }
        None => Vec::new(),
    }
}
