//! Product catalog client over the backing REST API.
//!
//! Mirrors the browser behavior the store shipped with: the full product
//! list is fetched once and cached, per-product lookups try the direct
//! endpoint first and fall back to the cached list when the API is
//! unreachable, and search/category/bestseller queries are filters over
//! the cached list.
//!
//! Caching uses `moka` with a short TTL; callers that need a guaranteed
//! fresh list use [`CatalogClient::refresh`].

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use elegance_core::ProductId;

/// How long the cached product list stays fresh.
const PRODUCTS_TTL: Duration = Duration::from_secs(300);

/// The single cache key for the full list.
const ALL_PRODUCTS: &str = "products";

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    /// Discount percentage (0-100) when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_volume: String,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Case-insensitive search over name, tagline, and description.
    /// `lower_term` must already be lowercased.
    fn matches(&self, lower_term: &str) -> bool {
        self.name.to_lowercase().contains(lower_term)
            || self.tagline.to_lowercase().contains(lower_term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(lower_term))
    }
}

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} for {url}")]
    Api { status: u16, url: String },

    /// Product not found, neither directly nor in the full list.
    #[error("product not found: {0}")]
    NotFound(String),
}

/// Catalog API client with an in-memory response cache.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    products: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a client against the given API base (e.g.
    /// `http://localhost:3000/api`).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            products: Cache::builder()
                .max_capacity(1)
                .time_to_live(PRODUCTS_TTL)
                .build(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// All products, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the cache is cold and the API call
    /// fails.
    pub async fn get_all(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.products.get(&ALL_PRODUCTS).await {
            return Ok(products);
        }
        self.refresh().await
    }

    /// Fetch a fresh list, replacing whatever the cache holds.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the API call fails; the previous
    /// cached list (if any) is left in place.
    pub async fn refresh(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        let url = self.endpoint("products");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                url,
            });
        }

        let products: Vec<Product> = response.json().await?;
        let products = Arc::new(products);
        self.products
            .insert(ALL_PRODUCTS, Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Single product by id.
    ///
    /// Tries the direct endpoint first; on any failure falls back to
    /// scanning the (possibly cached) full list, the way the browser
    /// client kept working when the API flaked.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the product exists nowhere,
    /// otherwise the underlying transport error.
    pub async fn get_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"));
        match self.fetch_one(url).await {
            Ok(product) => Ok(product),
            Err(e) => {
                tracing::warn!(%id, error = %e, "direct product lookup failed, falling back to list");
                let products = self.get_all().await?;
                products
                    .iter()
                    .find(|p| p.id.as_str() == id)
                    .cloned()
                    .ok_or_else(|| CatalogError::NotFound(id.to_owned()))
            }
        }
    }

    async fn fetch_one(&self, url: String) -> Result<Product, CatalogError> {
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }

    /// Products in the given category.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogClient::get_all`] failures.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.get_all().await?;
        Ok(products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    /// Products flagged as bestsellers.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogClient::get_all`] failures.
    pub async fn bestsellers(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.get_all().await?;
        Ok(products
            .iter()
            .filter(|p| p.is_best_seller)
            .cloned()
            .collect())
    }

    /// Case-insensitive search over name, tagline, and description.
    /// An empty term matches nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogClient::get_all`] failures.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.get_all().await?;
        Ok(products
            .iter()
            .filter(|p| p.matches(&term))
            .cloned()
            .collect())
    }

    /// Distinct category names in first-seen order.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogClient::get_all`] failures.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let products = self.get_all().await?;
        let mut seen = Vec::new();
        for product in products.iter() {
            if !product.category.is_empty() && !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        Ok(seen)
    }
}
