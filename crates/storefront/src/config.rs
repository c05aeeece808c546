//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ELEGANCE_API_BASE_URL` - Base URL of the backing REST API
//!   (default: `http://localhost:3000/api`)
//! - `ELEGANCE_DATA_DIR` - Directory for persisted cart/wishlist state
//!   (default: `.elegance`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// API base used when none is configured (the local dev server).
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Persistence directory used when none is configured.
const DEFAULT_DATA_DIR: &str = ".elegance";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the backing REST API.
    pub api_base_url: Url,
    /// Directory holding the persisted cart and wishlist documents.
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when `ELEGANCE_API_BASE_URL`
    /// is set but is not a valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base = std::env::var("ELEGANCE_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = Url::parse(&raw_base).map_err(|e| {
            ConfigError::InvalidEnvVar("ELEGANCE_API_BASE_URL".to_owned(), e.to_string())
        })?;

        let data_dir = std::env::var("ELEGANCE_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            api_base_url,
            data_dir,
        })
    }
}
