//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to the defaults the original
//! page hard-coded:
//!
//! - `TIENDA_TAX_RATE` - VAT rate applied at checkout (default: 0.21)
//! - `TIENDA_PLACEHOLDER_IMAGE` - image URL used when a product has no
//!   usable image (default: a via.placeholder.com URL)
//! - `TIENDA_MAX_AVATAR_BYTES` - maximum accepted avatar file size
//!   (default: 2 MiB)
//! - `TIENDA_DATA_FILE` - path of the JSON file backing durable storage in
//!   the demo binary (default: `tienda-data.json`)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Default VAT rate (21%, Spain).
const DEFAULT_TAX_RATE: &str = "0.21";

/// Default placeholder for missing or broken product images.
const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/60?text=No+Img";

/// Default avatar size cap: 2 MiB.
const DEFAULT_MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// VAT rate applied to the checkout subtotal.
    pub tax_rate: Decimal,
    /// Image URL substituted for missing product images.
    pub placeholder_image: String,
    /// Maximum accepted avatar upload size in bytes.
    pub max_avatar_bytes: usize,
    /// Where the demo binary keeps its durable key-value file.
    pub data_file: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // The literal parses; fall back to Decimal math if it ever changed.
            tax_rate: DEFAULT_TAX_RATE
                .parse()
                .unwrap_or_else(|_| Decimal::new(21, 2)),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
            data_file: PathBuf::from("tienda-data.json"),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let tax_rate = match get_optional_env("TIENDA_TAX_RATE") {
            Some(raw) => raw.parse::<Decimal>().map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDA_TAX_RATE".to_owned(), e.to_string())
            })?,
            None => defaults.tax_rate,
        };

        let max_avatar_bytes = match get_optional_env("TIENDA_MAX_AVATAR_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDA_MAX_AVATAR_BYTES".to_owned(), e.to_string())
            })?,
            None => defaults.max_avatar_bytes,
        };

        Ok(Self {
            tax_rate,
            placeholder_image: get_optional_env("TIENDA_PLACEHOLDER_IMAGE")
                .unwrap_or(defaults.placeholder_image),
            max_avatar_bytes,
            data_file: get_optional_env("TIENDA_DATA_FILE")
                .map_or(defaults.data_file, PathBuf::from),
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_21_percent() {
        let config = StorefrontConfig::default();
        assert_eq!(config.tax_rate, Decimal::new(21, 2));
    }

    #[test]
    fn test_default_avatar_cap() {
        let config = StorefrontConfig::default();
        assert_eq!(config.max_avatar_bytes, 2 * 1024 * 1024);
    }
}
