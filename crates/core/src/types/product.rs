//! The immutable catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Badge, Category, Price, ProductId};

/// A product as supplied by the catalog.
///
/// Products are created once when the catalog loads and are never mutated
/// afterwards. Identity is the [`ProductId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Current selling price in USD.
    pub price: Decimal,
    /// Pre-sale price, rendered struck through next to `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// The selling price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// The pre-sale price, if one is set and higher than the selling price.
    #[must_use]
    pub fn compare_at_price(&self) -> Option<Price> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(Price::usd)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": 1, "name": "Silk Evening Dress", "category": "women",
            "price": 459, "originalPrice": 599, "rating": 4.8,
            "description": "Elegant flowing silk dress in midnight noir.",
            "badge": "NEW", "image": "https://example.com/dress.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, Category::Women);
        assert_eq!(product.badge, Some(Badge::New));
        assert_eq!(product.unit_price().to_string(), "$459.00");
        assert_eq!(
            product.compare_at_price().map(|p| p.to_string()).as_deref(),
            Some("$599.00")
        );
    }

    #[test]
    fn test_deserialize_minimal_record_with_desc_alias() {
        let json = r#"{
            "id": 4, "name": "Chronos Gold Watch", "category": "accessories",
            "price": 799, "image": "watch.jpg", "desc": "Swiss automatic movement."
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(
            product.description.as_deref(),
            Some("Swiss automatic movement.")
        );
        assert_eq!(product.badge, None);
        assert_eq!(product.compare_at_price(), None);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{"id": 9, "name": "Hat", "category": "kids", "price": 10, "image": "x"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
