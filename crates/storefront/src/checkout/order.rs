//! Order confirmation produced by a successful checkout.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zaziza_core::Price;

use super::step::ShippingMethod;
use crate::cart::CartLineItem;

/// Display-only order number such as `ZZ-4821`.
///
/// Randomly generated and never checked for uniqueness; it is not an
/// idempotency key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderReference(String);

impl OrderReference {
    /// Draw a fresh reference: `ZZ-` followed by four digits.
    #[must_use]
    pub fn generate() -> Self {
        let number: u16 = rand::rng().random_range(1000..=9999);
        Self(format!("ZZ-{number}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receipt shown on the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub reference: OrderReference,
    pub email: String,
    /// Snapshot of the cart at the moment of payment.
    pub items: Vec<CartLineItem>,
    pub subtotal: Price,
    pub shipping_method: ShippingMethod,
    pub shipping_cost: Price,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        for _ in 0..50 {
            let reference = OrderReference::generate();
            let digits = reference.as_str().strip_prefix("ZZ-").unwrap_or_default();
            assert_eq!(digits.len(), 4, "unexpected reference {reference}");
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(!digits.starts_with('0'));
        }
    }
}
