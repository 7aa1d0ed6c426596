//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPPYGLOBE_STORAGE_DIR` - Directory holding persisted entries (default: `.shoppyglobe`)
//! - `SHOPPYGLOBE_CART_KEY` - Storage key of the cart slice (default: `shoppyglobe-cart`)

use std::path::PathBuf;

use thiserror::Error;

use crate::persistence::CART_STORAGE_KEY;
use crate::storage::{FileStorage, validate_key};

const DEFAULT_STORAGE_DIR: &str = ".shoppyglobe";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where and under which key the cart is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory for [`FileStorage`]
    pub storage_dir: PathBuf,
    /// Storage key of the cart slice
    pub cart_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = lookup("SHOPPYGLOBE_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let cart_key =
            lookup("SHOPPYGLOBE_CART_KEY").unwrap_or_else(|| CART_STORAGE_KEY.to_string());
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPPYGLOBE_CART_KEY".to_string(), e.to_string())
        })?;

        Ok(Self {
            storage_dir,
            cart_key,
        })
    }

    /// File-backed storage rooted at the configured directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_dir.clone())
    }
}
