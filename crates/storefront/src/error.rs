//! Unified error type for the storefront library.
//!
//! Each concern has its own error enum. `StorefrontError` wraps them for
//! callers (such as the CLI) that just want to propagate with `?`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::persistence::PersistenceError;

/// Any error the storefront library can produce.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The product catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisted state could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A checkout operation was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
