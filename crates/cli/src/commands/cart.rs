//! Cart commands.

use zaziza_core::ProductId;
use zaziza_storefront::Storefront;

pub fn show(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }
    for line in cart.lines() {
        tracing::info!(
            id = %line.product_id,
            "{} × {} = {}",
            line.name,
            line.quantity,
            line.line_total()
        );
    }
    tracing::info!(items = cart.item_count(), "Subtotal {}", cart.subtotal());
}

/// Add one unit. An unknown id is reported and otherwise ignored.
pub fn add(storefront: &mut Storefront, product_id: ProductId) {
    if storefront.add_to_cart(product_id).is_none() {
        tracing::warn!(id = %product_id, "Product is not in the catalog");
    }
}

pub fn remove(storefront: &mut Storefront, product_id: ProductId) {
    if storefront.remove_from_cart(product_id).is_none() {
        tracing::info!(id = %product_id, "Product is not in the cart");
    }
}

pub fn clear(storefront: &mut Storefront) {
    storefront.clear_cart();
    tracing::info!("Cart cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use zaziza_storefront::catalog::Catalog;
    use zaziza_storefront::config::StorefrontConfig;
    use zaziza_storefront::persistence::MemoryStore;
    use zaziza_storefront::presenter::NullPresenter;

    use super::*;

    fn storefront() -> Storefront {
        Storefront::with_catalog(
            StorefrontConfig::default(),
            Catalog::embedded().unwrap(),
            Arc::new(MemoryStore::new()),
            Arc::new(NullPresenter),
        )
    }

    #[test]
    fn test_add_unknown_product_is_not_fatal() {
        let mut storefront = storefront();
        add(&mut storefront, ProductId::new(42));
        assert!(storefront.cart().is_empty());

        add(&mut storefront, ProductId::new(1));
        assert_eq!(storefront.cart().item_count(), 1);
    }

    #[test]
    fn test_remove_absent_product_is_not_fatal() {
        let mut storefront = storefront();
        remove(&mut storefront, ProductId::new(3));
        assert!(storefront.cart().is_empty());
    }
}
