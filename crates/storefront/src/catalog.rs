//! Catalog provider.
//!
//! The catalog is an ordered, read-only list of products. It is either
//! compiled into the binary or read once from a static JSON file at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::instrument;
use zaziza_core::{Product, ProductId};

/// The demo catalog shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../data/products.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not a valid product array.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product has id zero.
    #[error("Product ids must be positive (\"{0}\" has id 0)")]
    InvalidId(String),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// An ordered, immutable product list with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, validating ids and prices.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on a zero id, a duplicate id, or a negative price.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.id.as_u32() == 0 {
                return Err(CatalogError::InvalidId(product.name.clone()));
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// A catalog with no products, used when loading fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Read a catalog from a static JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(products = catalog.len(), "Catalog loaded from file");
        Ok(catalog)
    }

    /// Load from `path` if given, otherwise use the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the chosen source cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(Self::embedded, Self::from_json_file)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
