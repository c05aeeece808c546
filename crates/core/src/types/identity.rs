//! Cart line identity: product reference plus normalized variant.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// Variant discriminator for a product (e.g. a package size like "50ml").
///
/// A missing variant and an empty string are the same variant: both
/// normalize to the empty volume, so "no size chosen" compares equal no
/// matter how the caller spelled it. Surrounding whitespace is trimmed
/// because variant labels are lifted from UI text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(String);

impl Volume {
    /// Normalize a raw variant value.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        Self(raw.map(str::trim).unwrap_or_default().to_owned())
    }

    /// The normalized variant label; empty when no variant was chosen.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no variant was chosen.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity key for a cart row.
///
/// Two additions refer to the same row exactly when product id and
/// normalized volume both match; the wishlist keys on product id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product: ProductId,
    pub volume: Volume,
}

impl LineKey {
    /// Build a key from a product reference and a raw variant value.
    #[must_use]
    pub fn new(product: ProductId, volume: Option<&str>) -> Self {
        Self {
            product,
            volume: Volume::normalize(volume),
        }
    }
}
