//! Elegance Core - Shared types library.
//!
//! This crate provides common types used across the Elegance components:
//! - `storefront` - Cart/wishlist state and API boundary clients
//! - `cli` - Command-line tools for inspecting and mutating local state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the cart line identity key, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
