//! Catalog listing.

use zaziza_core::{Badge, Category, Product};
use zaziza_storefront::Storefront;

/// Which products `zaziza products` shows. Empty criteria match everything.
#[derive(Debug, Default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub badge: Option<Badge>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
            && self.badge.is_none_or(|b| product.badge == Some(b))
            && self.search.as_deref().is_none_or(|needle| {
                product
                    .name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}

/// Log each product matching `filter`.
pub fn list(storefront: &Storefront, filter: &ProductFilter) {
    if !storefront.catalog_available() {
        tracing::warn!("Product data unavailable");
        return;
    }

    let matches: Vec<&Product> = storefront
        .catalog()
        .products()
        .iter()
        .filter(|product| filter.matches(product))
        .collect();

    if matches.is_empty() {
        tracing::info!("No products found");
        return;
    }

    for product in matches {
        let was = product
            .compare_at_price()
            .map(|price| format!(" (was {price})"))
            .unwrap_or_default();
        let badge = product
            .badge
            .map(|badge| format!(" [{badge}]"))
            .unwrap_or_default();
        let liked = if storefront.wishlist().contains(product.id) {
            " ♥"
        } else {
            ""
        };
        tracing::info!(
            id = %product.id,
            category = %product.category,
            "{} {}{was}{badge}{liked}",
            product.name,
            product.unit_price(),
        );
    }
}
