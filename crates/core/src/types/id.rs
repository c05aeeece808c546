//! Newtype IDs for type-safe entity references.
//!
//! Product and order identifiers come from the backing REST API as opaque
//! strings, so the wrappers here hold a `String` rather than a numeric
//! type. Use the `define_id!` macro to create additional ID wrappers that
//! prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use elegance_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("prod-42");
/// let order_id = OrderId::new("ord-42");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// True when the ID is the empty string.
            ///
            /// The API never issues empty IDs; an empty value means the
            /// reference was built from missing input.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_construction() {
        let id = ProductId::new("prod-42");
        assert_eq!(id.as_str(), "prod-42");
        assert_eq!(format!("{id}"), "prod-42");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_empty_id() {
        assert!(ProductId::new("").is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("prod-42");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"prod-42\"");

        let parsed: ProductId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
