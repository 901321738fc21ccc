//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ZAZIZA_DATA_DIR` - Directory for persisted cart/wishlist state (default: `.zaziza`)
//! - `ZAZIZA_CATALOG_PATH` - Static JSON catalog to load instead of the embedded one
//! - `ZAZIZA_PAYMENT_DELAY_MS` - Simulated payment confirmation delay (default: 1500)
//! - `ZAZIZA_STRICT_EMAIL` - Require a well-formed contact email (default: false)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".zaziza";
const DEFAULT_PAYMENT_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the persisted key-value files
    pub data_dir: PathBuf,
    /// Static catalog file; `None` uses the compiled-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Artificial pause standing in for a payment round trip
    pub payment_delay: Duration,
    /// Validate email format at the contact step, not just presence
    pub strict_email: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            strict_email: false,
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
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("ZAZIZA_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = lookup("ZAZIZA_CATALOG_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let payment_delay = match lookup("ZAZIZA_PAYMENT_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("ZAZIZA_PAYMENT_DELAY_MS".to_string(), e.to_string())
                })?,
            None => Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
        };

        let strict_email = match lookup("ZAZIZA_STRICT_EMAIL") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "ZAZIZA_STRICT_EMAIL".to_string(),
                    format!("expected true/false, got '{raw}'"),
                )
            })?,
            None => false,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            payment_delay,
            strict_email,
        })
    }
}

/// Parse the boolean spellings accepted in `.env` files.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.payment_delay, Duration::from_millis(1500));
        assert!(!config.strict_email);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("ZAZIZA_DATA_DIR", "/tmp/zaziza"),
            ("ZAZIZA_CATALOG_PATH", "catalog.json"),
            ("ZAZIZA_PAYMENT_DELAY_MS", "0"),
            ("ZAZIZA_STRICT_EMAIL", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/zaziza"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.payment_delay, Duration::ZERO);
        assert!(config.strict_email);
    }

    #[test]
    fn test_blank_catalog_path_means_embedded() {
        let config =
            StorefrontConfig::from_lookup(lookup_from(&[("ZAZIZA_CATALOG_PATH", "  ")])).unwrap();
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_invalid_delay() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("ZAZIZA_PAYMENT_DELAY_MS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "ZAZIZA_PAYMENT_DELAY_MS"));
    }

    #[test]
    fn test_invalid_strict_email_flag() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[("ZAZIZA_STRICT_EMAIL", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
