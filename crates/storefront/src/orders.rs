//! Order submission and checkout validation.
//!
//! The checkout form collects the customer's name, email, phone, and
//! delivery address; [`CheckoutDetails::parse`] validates them once at the
//! boundary. [`OrderDraft`] snapshots the cart into the payload the orders
//! endpoint expects. On a successful submission the caller owns clearing
//! the cart.

use serde::Serialize;
use thiserror::Error;
use url::Url;

use elegance_core::{Email, EmailError, OrderId};

use crate::cart::{CartLineItem, CartManager};

/// Validated customer details from the checkout form.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
}

/// Checkout form validation failures, one per field so the form can mark
/// the offending input.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("phone number is required")]
    MissingPhone,
    #[error("delivery address is required")]
    MissingAddress,
}

impl CheckoutDetails {
    /// Validate raw form input. Fields are trimmed first; emptiness after
    /// trimming fails validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`CheckoutError`].
    pub fn parse(
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, CheckoutError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CheckoutError::MissingName);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(CheckoutError::MissingEmail);
        }
        let email = Email::parse(email)?;

        let phone = phone.trim();
        if phone.is_empty() {
            return Err(CheckoutError::MissingPhone);
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            phone: phone.to_owned(),
            address: address.to_owned(),
        })
    }
}

/// Payload POSTed to the orders endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub status: String,
}

impl OrderDraft {
    /// Snapshot the cart into an order payload. Orders start `pending`.
    #[must_use]
    pub fn from_cart(details: CheckoutDetails, cart: &CartManager) -> Self {
        Self {
            customer_name: details.name,
            customer_email: details.email.into_inner(),
            customer_phone: details.phone,
            customer_address: details.address,
            items: cart.items().to_vec(),
            total: cart.total_price(),
            status: "pending".to_owned(),
        }
    }

    /// True when there is nothing to order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The draft carries no items.
    #[error("cannot submit an empty order")]
    EmptyOrder,
}

/// Client for the order submission endpoint.
#[derive(Clone)]
pub struct OrdersClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OrdersClient {
    /// Create a client against the given API base.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Submit an order.
    ///
    /// The cart is not touched here: on success the caller clears it, so a
    /// transport failure leaves the customer's cart intact for a retry.
    /// Returns the created order's id when the API echoes the stored
    /// record back.
    ///
    /// # Errors
    ///
    /// [`OrderError::EmptyOrder`] for a draft with no items, otherwise the
    /// transport or API failure.
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Option<OrderId>, OrderError> {
        if draft.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let url = format!("{}/orders", self.base_url.as_str().trim_end_matches('/'));
        let response = self.http.post(&url).json(draft).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<serde_json::Value>().await.ok();
        Ok(body.as_ref().and_then(created_order_id))
    }
}

/// Pull the created order's id out of the response body. Backends that
/// echo the stored record use either string or numeric ids.
fn created_order_id(body: &serde_json::Value) -> Option<OrderId> {
    match body.get("id")? {
        serde_json::Value::String(s) => Some(OrderId::new(s.clone())),
        serde_json::Value::Number(n) => Some(OrderId::new(n.to_string())),
        _ => None,
    }
}
