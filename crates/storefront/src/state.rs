//! Storefront state shared by every front end.

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use zaziza_core::ProductId;

use crate::cart::{CartLineItem, CartStore};
use crate::catalog::Catalog;
use crate::checkout::{
    CheckoutError, CheckoutSession, CheckoutStep, OrderConfirmation, OrderReference, OrderTotals,
    PaymentProcessor, PaymentRequest, ShippingMethod,
};
use crate::config::StorefrontConfig;
use crate::persistence::KeyValueStore;
use crate::presenter::{Notification, Presenter};
use crate::wishlist::WishlistStore;

/// How a checkout session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was placed; the cart has already been cleared.
    Completed(OrderConfirmation),
    /// The shopper left before paying; the cart is untouched.
    Cancelled,
}

/// The shopper's storefront: catalog, cart, wishlist, and the open checkout.
///
/// Constructed once at startup and passed to whatever renders it. All
/// mutation goes through `&mut self`, so there is never more than one
/// operation in progress.
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    catalog_available: bool,
    cart: CartStore,
    wishlist: WishlistStore,
    checkout: Option<CheckoutSession>,
    presenter: Arc<dyn Presenter>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("catalog_available", &self.catalog_available)
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("checkout", &self.checkout)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Load the configured catalog and restore the persisted cart and
    /// wishlist.
    ///
    /// A catalog that fails to load is reported to the presenter and
    /// replaced by an empty one; the storefront still opens.
    pub fn open(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        match Catalog::load(config.catalog_path.as_deref()) {
            Ok(catalog) => Self::with_catalog(config, catalog, store, presenter),
            Err(err) => {
                tracing::warn!(error = %err, "Catalog unavailable, opening with no products");
                presenter.catalog_unavailable(&err.to_string());
                let mut storefront = Self::with_catalog(config, Catalog::empty(), store, presenter);
                storefront.catalog_available = false;
                storefront
            }
        }
    }

    /// Open with an already loaded catalog.
    pub fn with_catalog(
        config: StorefrontConfig,
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let cart = CartStore::restore(catalog.clone(), store.clone(), presenter.clone());
        let wishlist = WishlistStore::restore(store, presenter.clone());
        tracing::info!(
            products = catalog.len(),
            cart_items = cart.item_count(),
            wishlist = wishlist.count(),
            "Storefront opened"
        );
        Self {
            config,
            catalog,
            catalog_available: true,
            cart,
            wishlist,
            checkout: None,
            presenter,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// False when the catalog failed to load and the storefront is degraded.
    #[must_use]
    pub const fn catalog_available(&self) -> bool {
        self.catalog_available
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Add one unit. Unknown ids are ignored and return `None`.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Option<&CartLineItem> {
        self.cart.add_item(product_id)?;
        self.report_totals();
        self.cart.line(product_id)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<CartLineItem> {
        let removed = self.cart.remove_item(product_id)?;
        self.report_totals();
        Some(removed)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.report_totals();
    }

    /// Returns `true` if the product is on the wishlist afterwards.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        self.wishlist.toggle(product_id)
    }

    /// Open a fresh checkout session, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` (after notifying the presenter) if
    /// the cart has no items. No session is created in that case.
    #[instrument(skip(self))]
    pub fn start_checkout(&mut self) -> Result<&mut CheckoutSession, CheckoutError> {
        if self.cart.is_empty() {
            self.presenter.notify(&Notification::CartEmpty);
            return Err(CheckoutError::EmptyCart);
        }
        if self.checkout.is_some() {
            tracing::debug!("Discarding previous checkout session");
        }
        tracing::info!(items = self.cart.item_count(), "Checkout started");
        let session = CheckoutSession::new(self.config.strict_email);
        self.presenter.totals_updated(&session.totals(&self.cart));
        Ok(self.checkout.insert(session))
    }

    /// The open checkout session, if any.
    #[must_use]
    pub const fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    /// Mutable access for filling in the contact and payment forms.
    pub const fn checkout_mut(&mut self) -> Option<&mut CheckoutSession> {
        self.checkout.as_mut()
    }

    /// Validate the current step and move forward.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoSession` with no open session; otherwise
    /// whatever [`CheckoutSession::advance`] rejects. Validation failures
    /// are also reported to the presenter as field errors.
    #[instrument(skip(self))]
    pub fn advance_checkout(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let session = self.checkout.as_mut().ok_or(CheckoutError::NoSession)?;
        let result = session.advance();
        if let Err(err) = &result {
            report_field_errors(self.presenter.as_ref(), err);
        }
        result
    }

    /// Go back one step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoSession` with no open session; otherwise
    /// whatever [`CheckoutSession::back`] rejects.
    pub fn back_checkout(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.checkout
            .as_mut()
            .ok_or(CheckoutError::NoSession)?
            .back()
    }

    /// Choose a delivery option on the shipping step and report the new
    /// totals.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoSession` with no open session, or
    /// `CheckoutError::WrongStep` off the shipping step.
    pub fn select_shipping(&mut self, method: ShippingMethod) -> Result<(), CheckoutError> {
        self.checkout
            .as_mut()
            .ok_or(CheckoutError::NoSession)?
            .select_shipping(method)?;
        self.report_totals();
        Ok(())
    }

    /// Totals for the open session, computed from the cart as it is now.
    #[must_use]
    pub fn order_totals(&self) -> Option<OrderTotals> {
        self.checkout
            .as_ref()
            .map(|session| session.totals(&self.cart))
    }

    /// Push fresh totals to the presenter while a session is open.
    fn report_totals(&self) {
        if let Some(totals) = self.order_totals() {
            self.presenter.totals_updated(&totals);
        }
    }

    /// Submit the payment form.
    ///
    /// While the processor runs, the session is marked as processing and
    /// rejects a second submission. On approval the cart is cleared, an
    /// order reference is drawn, and the session moves to `Success`. On
    /// rejection the session stays on `Payment` and the cart is untouched.
    ///
    /// If the returned future is dropped before it completes, the session
    /// stays in processing until it is closed.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::NoSession` with no open session
    /// - `CheckoutError::WrongStep` off the payment step
    /// - `CheckoutError::AlreadyProcessing` while a submission is in flight
    /// - `CheckoutError::Validation` if the payment form is incomplete
    /// - `CheckoutError::EmptyCart` if the cart was emptied during checkout
    /// - `CheckoutError::Payment` if the processor rejected the payment
    #[instrument(skip(self, processor))]
    pub async fn process_payment<P>(
        &mut self,
        processor: &P,
    ) -> Result<OrderConfirmation, CheckoutError>
    where
        P: PaymentProcessor,
    {
        let session = self.checkout.as_mut().ok_or(CheckoutError::NoSession)?;
        if let Err(err) = session.begin_processing() {
            report_field_errors(self.presenter.as_ref(), &err);
            return Err(err);
        }
        if self.cart.is_empty() {
            session.abort_processing();
            self.presenter.notify(&Notification::CartEmpty);
            return Err(CheckoutError::EmptyCart);
        }

        let totals = session.totals(&self.cart);
        let request = PaymentRequest {
            amount: totals.total,
            card_last4: session.payment().card_last4(),
            cardholder_name: session.payment().cardholder_name().trim().to_owned(),
        };

        let result = processor.confirm(&request).await;

        let session = self.checkout.as_mut().ok_or(CheckoutError::NoSession)?;
        if let Err(err) = result {
            session.abort_processing();
            tracing::warn!(error = %err, "Payment rejected");
            self.presenter.notify(&Notification::PaymentFailed {
                reason: err.to_string(),
            });
            return Err(err.into());
        }

        let confirmation = OrderConfirmation {
            reference: OrderReference::generate(),
            email: session.contact().email.trim().to_owned(),
            items: self.cart.lines().to_vec(),
            subtotal: totals.subtotal,
            shipping_method: session.shipping(),
            shipping_cost: totals.shipping,
            total: totals.total,
            placed_at: Utc::now(),
        };
        self.cart.clear();
        session.complete(confirmation.clone());

        tracing::info!(
            reference = %confirmation.reference,
            total = %confirmation.total,
            "Order placed"
        );
        self.presenter.notify(&Notification::OrderPlaced {
            reference: confirmation.reference.clone(),
        });
        Ok(confirmation)
    }

    /// Close the checkout, returning how it ended.
    ///
    /// Returns `None` if no session was open.
    #[instrument(skip(self))]
    pub fn close_checkout(&mut self) -> Option<CheckoutOutcome> {
        let session = self.checkout.take()?;
        let outcome = session
            .into_confirmation()
            .map_or(CheckoutOutcome::Cancelled, CheckoutOutcome::Completed);
        match &outcome {
            CheckoutOutcome::Completed(confirmation) => {
                tracing::info!(reference = %confirmation.reference, "Checkout closed");
            }
            CheckoutOutcome::Cancelled => tracing::info!("Checkout cancelled"),
        }
        Some(outcome)
    }
}

fn report_field_errors(presenter: &dyn Presenter, err: &CheckoutError) {
    if let CheckoutError::Validation { step, fields } = err {
        presenter.field_errors(*step, fields);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use rust_decimal::Decimal;
    use zaziza_core::Price;

    use super::*;
    use crate::checkout::{FormField, PaymentError, SimulatedPaymentProcessor};
    use crate::persistence::MemoryStore;
    use crate::presenter::{PresenterEvent, RecordingPresenter};

    struct DecliningProcessor;

    impl PaymentProcessor for DecliningProcessor {
        async fn confirm(&self, _request: &PaymentRequest) -> Result<(), PaymentError> {
            Err(PaymentError::Declined)
        }
    }

    fn instant() -> SimulatedPaymentProcessor {
        SimulatedPaymentProcessor::new(Duration::ZERO)
    }

    fn storefront() -> (Storefront, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::new());
        let storefront = Storefront::with_catalog(
            StorefrontConfig::default(),
            Catalog::embedded().unwrap(),
            Arc::new(MemoryStore::new()),
            presenter.clone(),
        );
        (storefront, presenter)
    }

    fn usd(amount: i64) -> Price {
        Price::usd(Decimal::from(amount))
    }

    /// Start checkout and fill every form up to the payment step.
    fn reach_payment(storefront: &mut Storefront, shipping: ShippingMethod) {
        let session = storefront.start_checkout().unwrap();
        let contact = session.contact_mut();
        contact.email = "ada@zaziza.com".to_string();
        contact.first_name = "Ada".to_string();
        contact.last_name = "Lovelace".to_string();
        contact.address = "12 Analytical Row".to_string();
        contact.city = "London".to_string();
        contact.postal_code = "NW1".to_string();
        storefront.advance_checkout().unwrap();
        storefront.select_shipping(shipping).unwrap();
        storefront.advance_checkout().unwrap();

        let payment = storefront.checkout_mut().unwrap().payment_mut();
        payment.set_card_number("4242424242424242");
        payment.set_expiry("1228");
        payment.set_cvc("123");
        payment.set_cardholder_name("Ada Lovelace");
    }

    #[test]
    fn test_empty_cart_blocks_checkout() {
        let (mut storefront, presenter) = storefront();
        assert_eq!(
            storefront.start_checkout().map(|_| ()),
            Err(CheckoutError::EmptyCart)
        );
        assert!(storefront.checkout().is_none());
        assert_eq!(presenter.notifications(), vec![Notification::CartEmpty]);
    }

    #[test]
    fn test_operations_without_session() {
        let (mut storefront, _) = storefront();
        assert_eq!(storefront.advance_checkout(), Err(CheckoutError::NoSession));
        assert_eq!(storefront.back_checkout(), Err(CheckoutError::NoSession));
        assert!(storefront.order_totals().is_none());
        assert!(storefront.close_checkout().is_none());
    }

    #[test]
    fn test_start_checkout_always_resets() {
        let (mut storefront, _) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        reach_payment(&mut storefront, ShippingMethod::Express);

        let session = storefront.start_checkout().unwrap();
        assert_eq!(session.step(), CheckoutStep::Contact);
        assert_eq!(session.shipping(), ShippingMethod::Standard);
        assert!(session.contact().email.is_empty());
        assert_eq!(session.payment().card_digit_count(), 0);
    }

    #[test]
    fn test_validation_failure_reports_fields() {
        let (mut storefront, presenter) = storefront();
        storefront.add_to_cart(ProductId::new(2));
        storefront.start_checkout().unwrap();

        let err = storefront.advance_checkout().unwrap_err();
        assert!(matches!(err, CheckoutError::Validation { .. }));
        assert_eq!(
            storefront.checkout().unwrap().step(),
            CheckoutStep::Contact
        );
        assert!(presenter.events().iter().any(|event| matches!(
            event,
            PresenterEvent::FieldErrors { step: CheckoutStep::Contact, fields }
                if fields.len() == 6 && fields.first() == Some(&FormField::Email)
        )));
    }

    #[test]
    fn test_express_adds_exactly_25() {
        let (mut storefront, _) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        storefront.add_to_cart(ProductId::new(4));

        reach_payment(&mut storefront, ShippingMethod::Standard);
        assert_eq!(storefront.order_totals().unwrap().total, usd(1258));

        reach_payment(&mut storefront, ShippingMethod::Express);
        assert_eq!(storefront.order_totals().unwrap().total, usd(1283));
    }

    #[test]
    fn test_totals_reported_on_every_change() {
        let (mut storefront, presenter) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        storefront.add_to_cart(ProductId::new(4));
        assert!(presenter.last_totals().is_none());

        let session = storefront.start_checkout().unwrap();
        assert_eq!(presenter.last_totals().unwrap().total, usd(1258));

        let contact = session.contact_mut();
        contact.email = "ada@zaziza.com".to_string();
        contact.first_name = "Ada".to_string();
        contact.last_name = "Lovelace".to_string();
        contact.address = "12 Analytical Row".to_string();
        contact.city = "London".to_string();
        contact.postal_code = "NW1".to_string();
        storefront.advance_checkout().unwrap();

        storefront.select_shipping(ShippingMethod::Express).unwrap();
        let totals = presenter.last_totals().unwrap();
        assert_eq!(totals.shipping, usd(25));
        assert_eq!(totals.total, usd(1283));

        storefront.remove_from_cart(ProductId::new(4));
        assert_eq!(presenter.last_totals().unwrap().total, usd(484));

        storefront.add_to_cart(ProductId::new(4));
        assert_eq!(presenter.last_totals().unwrap().total, usd(1283));

        // Unknown ids change nothing and report nothing.
        let reported = presenter.events().len();
        storefront.add_to_cart(ProductId::new(42));
        storefront.remove_from_cart(ProductId::new(42));
        assert_eq!(presenter.events().len(), reported);
    }

    #[tokio::test]
    async fn test_successful_payment() {
        let (mut storefront, presenter) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        storefront.add_to_cart(ProductId::new(4));
        storefront.toggle_wishlist(ProductId::new(3));
        reach_payment(&mut storefront, ShippingMethod::Express);

        let confirmation = storefront.process_payment(&instant()).await.unwrap();
        assert_eq!(confirmation.total, usd(1283));
        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.email, "ada@zaziza.com");

        assert!(storefront.cart().is_empty());
        assert!(storefront.wishlist().contains(ProductId::new(3)));
        let session = storefront.checkout().unwrap();
        assert_eq!(session.step(), CheckoutStep::Success);
        assert!(!session.is_processing());

        assert!(presenter.notifications().contains(&Notification::OrderPlaced {
            reference: confirmation.reference.clone(),
        }));

        assert_eq!(
            storefront.close_checkout(),
            Some(CheckoutOutcome::Completed(confirmation))
        );
        assert!(storefront.checkout().is_none());
        assert!(storefront.cart().is_empty());
    }

    #[tokio::test]
    async fn test_declined_payment_keeps_cart() {
        let (mut storefront, presenter) = storefront();
        storefront.add_to_cart(ProductId::new(6));
        reach_payment(&mut storefront, ShippingMethod::Standard);

        let err = storefront
            .process_payment(&DecliningProcessor)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::Payment(PaymentError::Declined));

        let session = storefront.checkout().unwrap();
        assert_eq!(session.step(), CheckoutStep::Payment);
        assert!(!session.is_processing());
        assert_eq!(storefront.cart().item_count(), 1);
        assert_eq!(
            presenter.notifications().last(),
            Some(&Notification::PaymentFailed {
                reason: "card declined".to_string()
            })
        );

        // The shopper can retry on the same session.
        storefront.process_payment(&instant()).await.unwrap();
        assert!(storefront.cart().is_empty());
    }

    #[tokio::test]
    async fn test_payment_requires_payment_step() {
        let (mut storefront, _) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        storefront.start_checkout().unwrap();

        let err = storefront.process_payment(&instant()).await.unwrap_err();
        assert_eq!(
            err,
            CheckoutError::WrongStep {
                expected: CheckoutStep::Payment,
                actual: CheckoutStep::Contact,
            }
        );
        assert_eq!(storefront.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_payment_with_emptied_cart() {
        let (mut storefront, _) = storefront();
        storefront.add_to_cart(ProductId::new(1));
        reach_payment(&mut storefront, ShippingMethod::Standard);
        storefront.remove_from_cart(ProductId::new(1));

        let err = storefront.process_payment(&instant()).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert!(!storefront.checkout().unwrap().is_processing());
    }

    #[test]
    fn test_cancel_leaves_cart_alone() {
        let (mut storefront, _) = storefront();
        storefront.add_to_cart(ProductId::new(7));
        storefront.add_to_cart(ProductId::new(7));
        reach_payment(&mut storefront, ShippingMethod::Express);

        assert_eq!(storefront.close_checkout(), Some(CheckoutOutcome::Cancelled));
        assert_eq!(storefront.cart().item_count(), 2);
    }

    #[test]
    fn test_open_degrades_without_catalog() {
        let presenter = Arc::new(RecordingPresenter::new());
        let config = StorefrontConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/zaziza/products.json")),
            ..StorefrontConfig::default()
        };
        let mut storefront =
            Storefront::open(config, Arc::new(MemoryStore::new()), presenter.clone());

        assert!(!storefront.catalog_available());
        assert!(storefront.catalog().is_empty());
        assert!(storefront.add_to_cart(ProductId::new(1)).is_none());
        assert!(matches!(
            presenter.events().first(),
            Some(PresenterEvent::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_open_restores_persisted_state() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let presenter = Arc::new(RecordingPresenter::new());
        {
            let mut first = Storefront::open(
                StorefrontConfig::default(),
                store.clone(),
                presenter.clone(),
            );
            first.add_to_cart(ProductId::new(5));
            first.toggle_wishlist(ProductId::new(8));
        }

        let second = Storefront::open(StorefrontConfig::default(), store, presenter);
        assert!(second.catalog_available());
        assert_eq!(second.cart().item_count(), 1);
        assert!(second.wishlist().contains(ProductId::new(8)));
    }
}
