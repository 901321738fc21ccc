//! Cart store.
//!
//! Owns the cart line items. Each product appears at most once; adding it
//! again bumps the quantity. Name and unit price are captured from the
//! catalog when the line is created, so later catalog changes never reprice
//! items already in the cart.
//!
//! Every mutation is persisted under [`keys::CART`] and reported to the
//! presenter before the call returns.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use zaziza_core::{Price, Product, ProductId};

use crate::catalog::Catalog;
use crate::persistence::{KeyValueStore, keys, load_json, save_json};
use crate::presenter::{Notification, Presenter};

/// One product's entry in the cart.
///
/// Serialized with the field names the browser demo used (`id`, `price`),
/// so carts saved there restore unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Unit price captured when the line was created.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.unit_price)
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// Badge count and subtotal, as shown in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of quantities across all lines.
    pub item_count: u32,
    /// Number of distinct products.
    pub line_count: usize,
    pub subtotal: Price,
}

/// The shopper's cart.
pub struct CartStore {
    catalog: Arc<Catalog>,
    lines: Vec<CartLineItem>,
    store: Arc<dyn KeyValueStore>,
    presenter: Arc<dyn Presenter>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty cart without reading persisted state.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            catalog,
            lines: Vec::new(),
            store,
            presenter,
        }
    }

    /// Create a cart holding whatever was last persisted.
    ///
    /// A missing or corrupt value yields an empty cart. Restored lines are
    /// normalized: duplicate product ids are merged and empty lines dropped.
    #[must_use]
    pub fn restore(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let saved: Vec<CartLineItem> = load_json(store.as_ref(), keys::CART);
        let mut cart = Self::new(catalog, store, presenter);
        cart.lines = normalize(saved);
        tracing::debug!(lines = cart.lines.len(), "Cart restored");
        cart
    }

    /// Add one unit of a product.
    ///
    /// Unknown product ids are ignored and return `None`.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, product_id: ProductId) -> Option<&CartLineItem> {
        let Some(product) = self.catalog.get(product_id) else {
            tracing::debug!("Ignoring add of unknown product");
            return None;
        };
        let name = product.name.clone();

        let position = match self.position(product_id) {
            Some(position) => {
                if let Some(line) = self.lines.get_mut(position) {
                    line.quantity = line.quantity.saturating_add(1);
                }
                position
            }
            None => {
                self.lines.push(CartLineItem::from_product(product));
                self.lines.len() - 1
            }
        };

        self.persist();
        self.presenter.notify(&Notification::ItemAdded { name });
        self.presenter.cart_updated(&self.summary());

        let line = self.lines.get(position);
        if let Some(line) = line {
            tracing::info!(quantity = line.quantity, "Item added to cart");
        }
        line
    }

    /// Remove a product's line entirely.
    ///
    /// Returns the removed line; removing an absent product is a no-op.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Option<CartLineItem> {
        let position = self.position(product_id)?;
        let removed = self.lines.remove(position);

        self.persist();
        self.presenter.notify(&Notification::ItemRemoved {
            name: removed.name.clone(),
        });
        self.presenter.cart_updated(&self.summary());
        tracing::info!("Item removed from cart");
        Some(removed)
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
        self.presenter.cart_updated(&self.summary());
    }

    /// Badge count: the sum of all quantities, not the number of products.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            line_count: self.lines.len(),
            subtotal: self.subtotal(),
        }
    }

    /// Lines in the order products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }

    fn persist(&self) {
        save_json(self.store.as_ref(), keys::CART, &self.lines);
    }
}

/// Merge duplicate product lines and drop empty ones, keeping first-seen order.
fn normalize(lines: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(lines.len());
    for line in lines.into_iter().filter(|line| line.quantity > 0) {
        match merged
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line),
        }
    }
    merged
}
