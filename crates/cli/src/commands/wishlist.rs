//! Wishlist commands.

use zaziza_core::ProductId;
use zaziza_storefront::Storefront;

pub fn show(storefront: &Storefront) {
    let wishlist = storefront.wishlist();
    if wishlist.count() == 0 {
        tracing::info!("Wishlist is empty");
        return;
    }
    for id in wishlist.ids() {
        match storefront.catalog().get(id) {
            Some(product) => tracing::info!(id = %id, "{} {}", product.name, product.unit_price()),
            None => tracing::info!(id = %id, "No longer in the catalog"),
        }
    }
}

/// Toggle a catalog product. An unknown id is reported and otherwise ignored.
pub fn toggle(storefront: &mut Storefront, product_id: ProductId) {
    if storefront.catalog().get(product_id).is_none() {
        tracing::warn!(id = %product_id, "Product is not in the catalog");
        return;
    }
    storefront.toggle_wishlist(product_id);
}
