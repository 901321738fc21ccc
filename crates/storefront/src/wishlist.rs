//! Wishlist store: a persisted set of liked product ids.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::instrument;
use zaziza_core::ProductId;

use crate::persistence::{KeyValueStore, keys, load_json, save_json};
use crate::presenter::{Notification, Presenter};

/// The shopper's wishlist.
pub struct WishlistStore {
    ids: BTreeSet<ProductId>,
    store: Arc<dyn KeyValueStore>,
    presenter: Arc<dyn Presenter>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Create an empty wishlist without reading persisted state.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            ids: BTreeSet::new(),
            store,
            presenter,
        }
    }

    /// Create a wishlist holding whatever was last persisted.
    #[must_use]
    pub fn restore(store: Arc<dyn KeyValueStore>, presenter: Arc<dyn Presenter>) -> Self {
        let saved: Vec<ProductId> = load_json(store.as_ref(), keys::WISHLIST);
        let mut wishlist = Self::new(store, presenter);
        wishlist.ids = saved.into_iter().collect();
        wishlist
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns `true` if the product is a member after the call.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        let member = if self.ids.remove(&product_id) {
            false
        } else {
            self.ids.insert(product_id);
            true
        };

        let ids: Vec<ProductId> = self.ids.iter().copied().collect();
        save_json(self.store.as_ref(), keys::WISHLIST, &ids);

        let count = self.ids.len();
        let notification = if member {
            Notification::WishlistAdded { count }
        } else {
            Notification::WishlistRemoved { count }
        };
        self.presenter.notify(&notification);
        self.presenter.wishlist_updated(count);
        tracing::info!(member, count, "Wishlist toggled");
        member
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Member ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::presenter::{NullPresenter, RecordingPresenter};

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist =
            WishlistStore::new(Arc::new(MemoryStore::new()), Arc::new(NullPresenter));

        assert!(wishlist.toggle(ProductId::new(3)));
        assert!(wishlist.contains(ProductId::new(3)));
        assert_eq!(wishlist.count(), 1);

        assert!(!wishlist.toggle(ProductId::new(3)));
        assert!(!wishlist.contains(ProductId::new(3)));
        assert_eq!(wishlist.count(), 0);
    }

    #[test]
    fn test_every_toggle_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut wishlist = WishlistStore::new(store.clone(), Arc::new(NullPresenter));
        wishlist.toggle(ProductId::new(5));
        wishlist.toggle(ProductId::new(2));
        assert_eq!(store.load(keys::WISHLIST).unwrap().as_deref(), Some("[2,5]"));

        wishlist.toggle(ProductId::new(5));
        let restored = WishlistStore::restore(store, Arc::new(NullPresenter));
        assert_eq!(restored.ids().collect::<Vec<_>>(), vec![ProductId::new(2)]);
    }

    #[test]
    fn test_restore_collapses_duplicates() {
        let store = Arc::new(MemoryStore::new());
        store.save(keys::WISHLIST, "[1, 1, 7]").unwrap();
        let wishlist = WishlistStore::restore(store, Arc::new(NullPresenter));
        assert_eq!(wishlist.count(), 2);
    }

    #[test]
    fn test_toggle_notifies_presenter() {
        let presenter = Arc::new(RecordingPresenter::new());
        let mut wishlist = WishlistStore::new(Arc::new(MemoryStore::new()), presenter.clone());
        wishlist.toggle(ProductId::new(8));
        wishlist.toggle(ProductId::new(8));
        assert_eq!(
            presenter.notifications(),
            vec![
                Notification::WishlistAdded { count: 1 },
                Notification::WishlistRemoved { count: 0 },
            ]
        );
    }
}
