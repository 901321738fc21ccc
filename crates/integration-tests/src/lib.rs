//! Integration tests for the Zaziza storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p zaziza-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - End-to-end checkout scenarios
//! - `persistence` - Cart and wishlist state across storefront restarts
//!
//! This library holds the fixtures those tests share.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use zaziza_core::Price;
use zaziza_storefront::Storefront;
use zaziza_storefront::checkout::{CheckoutSession, SimulatedPaymentProcessor};
use zaziza_storefront::config::StorefrontConfig;
use zaziza_storefront::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
use zaziza_storefront::presenter::RecordingPresenter;

/// A storefront wired to a recording presenter.
pub struct TestShop {
    pub storefront: Storefront,
    pub presenter: Arc<RecordingPresenter>,
}

impl TestShop {
    /// Open over an in-memory store with the embedded catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()))
    }

    /// Open over a JSON file store rooted at `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::open(Arc::new(JsonFileStore::new(dir)))
    }

    /// Open over any store.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let presenter = Arc::new(RecordingPresenter::new());
        let storefront = Storefront::open(test_config(), store, presenter.clone());
        Self {
            storefront,
            presenter,
        }
    }
}

/// Default configuration with no payment delay.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        payment_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// A processor that approves immediately.
#[must_use]
pub const fn instant_processor() -> SimulatedPaymentProcessor {
    SimulatedPaymentProcessor::new(Duration::ZERO)
}

/// Fill all six contact fields.
pub fn fill_contact(session: &mut CheckoutSession) {
    let contact = session.contact_mut();
    contact.email = "grace@zaziza.com".to_string();
    contact.first_name = "Grace".to_string();
    contact.last_name = "Hopper".to_string();
    contact.address = "1 Compiler Way".to_string();
    contact.city = "Arlington".to_string();
    contact.postal_code = "22201".to_string();
}

/// Fill the payment form with a valid test card.
pub fn fill_payment(session: &mut CheckoutSession) {
    let payment = session.payment_mut();
    payment.set_card_number("4242 4242 4242 4242");
    payment.set_expiry("0929");
    payment.set_cvc("321");
    payment.set_cardholder_name("Grace Hopper");
}

/// Whole-dollar USD amount.
#[must_use]
pub fn usd(amount: i64) -> Price {
    Price::usd(Decimal::from(amount))
}
