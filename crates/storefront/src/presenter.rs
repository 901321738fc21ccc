//! Presentation layer interface.
//!
//! The stores and the checkout flow report what happened through a
//! [`Presenter`]. Every call is fire-and-forget: nothing a presenter does can
//! change cart, wishlist, or checkout state.

use std::fmt;
use std::sync::Mutex;

use crate::cart::CartSummary;
use crate::checkout::{CheckoutStep, FormField, OrderReference, OrderTotals};

/// A transient, toast-style message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ItemAdded { name: String },
    ItemRemoved { name: String },
    WishlistAdded { count: usize },
    WishlistRemoved { count: usize },
    CartEmpty,
    OrderPlaced { reference: OrderReference },
    PaymentFailed { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemAdded { name } => write!(f, "{name} added!"),
            Self::ItemRemoved { name } => write!(f, "{name} removed"),
            Self::WishlistAdded { count } => write!(f, "Added to wishlist ({count} items)"),
            Self::WishlistRemoved { count } => {
                write!(f, "Removed from wishlist ({count} items)")
            }
            Self::CartEmpty => write!(f, "Cart is empty"),
            Self::OrderPlaced { reference } => write!(f, "Order {reference} placed"),
            Self::PaymentFailed { reason } => write!(f, "Payment failed: {reason}"),
        }
    }
}

/// Receives state-change reports from the core.
pub trait Presenter: Send + Sync {
    /// Show a transient message.
    fn notify(&self, notification: &Notification);

    /// Flag fields that failed validation on `step`.
    fn field_errors(&self, _step: CheckoutStep, _fields: &[FormField]) {}

    /// Refresh the cart badge and totals.
    fn cart_updated(&self, _summary: &CartSummary) {}

    /// Refresh the order summary of the open checkout.
    fn totals_updated(&self, _totals: &OrderTotals) {}

    /// Refresh the wishlist counter.
    fn wishlist_updated(&self, _count: usize) {}

    /// Show the degraded "data unavailable" state.
    fn catalog_unavailable(&self, _reason: &str) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn notify(&self, _notification: &Notification) {}
}

/// Reports every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn notify(&self, notification: &Notification) {
        tracing::info!("{notification}");
    }

    fn field_errors(&self, step: CheckoutStep, fields: &[FormField]) {
        let names: Vec<&str> = fields.iter().map(FormField::label).collect();
        tracing::warn!(%step, fields = ?names, "Please complete the highlighted fields");
    }

    fn cart_updated(&self, summary: &CartSummary) {
        tracing::debug!(
            items = summary.item_count,
            subtotal = %summary.subtotal,
            "Cart updated"
        );
    }

    fn totals_updated(&self, totals: &OrderTotals) {
        tracing::debug!(
            subtotal = %totals.subtotal,
            shipping = %totals.shipping,
            total = %totals.total,
            "Order totals updated"
        );
    }

    fn wishlist_updated(&self, count: usize) {
        tracing::debug!(count, "Wishlist updated");
    }

    fn catalog_unavailable(&self, reason: &str) {
        tracing::warn!(reason, "Product data unavailable");
    }
}

/// A presenter event captured by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Notification(Notification),
    FieldErrors {
        step: CheckoutStep,
        fields: Vec<FormField>,
    },
    CartUpdated(CartSummary),
    TotalsUpdated(OrderTotals),
    WishlistUpdated(usize),
    CatalogUnavailable(String),
}

/// Captures events in order so they can be rendered or asserted later.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Only the notifications, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Notification(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    /// The most recent cart summary, if any was reported.
    #[must_use]
    pub fn last_cart_summary(&self) -> Option<CartSummary> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::CartUpdated(summary) => Some(summary),
            _ => None,
        })
    }

    /// The most recent order totals, if any were reported.
    #[must_use]
    pub fn last_totals(&self) -> Option<OrderTotals> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::TotalsUpdated(totals) => Some(totals),
            _ => None,
        })
    }

    fn record(&self, event: PresenterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&self, notification: &Notification) {
        self.record(PresenterEvent::Notification(notification.clone()));
    }

    fn field_errors(&self, step: CheckoutStep, fields: &[FormField]) {
        self.record(PresenterEvent::FieldErrors {
            step,
            fields: fields.to_vec(),
        });
    }

    fn cart_updated(&self, summary: &CartSummary) {
        self.record(PresenterEvent::CartUpdated(summary.clone()));
    }

    fn totals_updated(&self, totals: &OrderTotals) {
        self.record(PresenterEvent::TotalsUpdated(*totals));
    }

    fn wishlist_updated(&self, count: usize) {
        self.record(PresenterEvent::WishlistUpdated(count));
    }

    fn catalog_unavailable(&self, reason: &str) {
        self.record(PresenterEvent::CatalogUnavailable(reason.to_owned()));
    }
}
