//! Checkout flow.
//!
//! A checkout session walks `Contact → Shipping → Payment → Success`.
//! Moving forward requires the current step to validate; moving back from
//! `Shipping` or `Payment` is always allowed and validates nothing. A failed
//! validation leaves the session on the same step and lists the offending
//! fields.
//!
//! A session never outlives one attempt: starting checkout always creates a
//! fresh one, and closing it (after success or by cancelling) drops it.
//! Payment submission, cart clearing, and the transition to `Success` are
//! driven by [`crate::state::Storefront::process_payment`], which owns both
//! the session and the cart.

mod form;
mod format;
mod order;
mod payment;
mod step;

use thiserror::Error;
use zaziza_core::Price;

pub use form::{ContactInfo, FormField, MIN_CARD_DIGITS, PaymentInfo};
pub use format::{
    MAX_CARD_DIGITS, MAX_CVC_DIGITS, MAX_EXPIRY_DIGITS, digits_only, format_card_number,
    format_cvc, format_expiry,
};
pub use order::{OrderConfirmation, OrderReference};
pub use payment::{PaymentError, PaymentProcessor, PaymentRequest, SimulatedPaymentProcessor};
pub use step::{CheckoutStep, ShippingMethod};

use crate::cart::CartStore;

/// Recoverable checkout failures. None of them end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout cannot start, or pay, with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// No checkout session is open.
    #[error("No checkout in progress")]
    NoSession,

    /// The operation belongs to a different step.
    #[error("Expected the {expected} step, but checkout is at {actual}")]
    WrongStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    /// `advance` was called where only payment submission (or nothing) can
    /// move the flow forward.
    #[error("Cannot advance from the {0} step")]
    CannotAdvance(CheckoutStep),

    /// `back` was called on `Contact` or `Success`.
    #[error("Cannot go back from the {0} step")]
    CannotGoBack(CheckoutStep),

    /// Required fields are missing or malformed.
    #[error("Please complete the {step} step: {}", join_fields(.fields))]
    Validation {
        step: CheckoutStep,
        fields: Vec<FormField>,
    },

    /// A submission is already in flight.
    #[error("Payment is already being processed")]
    AlreadyProcessing,

    /// The processor rejected the payment.
    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Order totals derived from the live cart and the shipping selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

/// State of one checkout attempt.
#[derive(Debug)]
pub struct CheckoutSession {
    step: CheckoutStep,
    contact: ContactInfo,
    shipping: ShippingMethod,
    payment: PaymentInfo,
    processing: bool,
    strict_email: bool,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSession {
    /// A fresh session at `Contact` with standard shipping and empty forms.
    #[must_use]
    pub fn new(strict_email: bool) -> Self {
        Self {
            step: CheckoutStep::Contact,
            contact: ContactInfo::default(),
            shipping: ShippingMethod::default(),
            payment: PaymentInfo::default(),
            processing: false,
            strict_email,
            confirmation: None,
        }
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub const fn contact_mut(&mut self) -> &mut ContactInfo {
        &mut self.contact
    }

    #[must_use]
    pub const fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    pub const fn payment_mut(&mut self) -> &mut PaymentInfo {
        &mut self.payment
    }

    #[must_use]
    pub const fn shipping(&self) -> ShippingMethod {
        self.shipping
    }

    /// True while a payment submission is in flight; the pay button is
    /// disabled for as long as this holds.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// The receipt, once the session reached `Success`.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Choose a delivery option. Only valid on the shipping step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` on any other step.
    pub fn select_shipping(&mut self, method: ShippingMethod) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping)?;
        self.shipping = method;
        tracing::debug!(%method, "Shipping method selected");
        Ok(())
    }

    /// Fields that currently block the forward transition.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<FormField> {
        match self.step {
            CheckoutStep::Contact => self.contact.invalid_fields(self.strict_email),
            CheckoutStep::Payment => self.payment.invalid_fields(),
            CheckoutStep::Shipping | CheckoutStep::Success => Vec::new(),
        }
    }

    /// Move from `Contact` to `Shipping` or from `Shipping` to `Payment`.
    ///
    /// `Payment` only moves forward through payment submission.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` if the current step is incomplete
    /// (the step is unchanged), or `CheckoutError::CannotAdvance` on
    /// `Payment` and `Success`.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let next = match self.step {
            CheckoutStep::Payment => None,
            step => step.next(),
        }
        .ok_or(CheckoutError::CannotAdvance(self.step))?;
        self.validate_current()?;
        self.step = next;
        tracing::debug!(step = %next, "Checkout advanced");
        Ok(next)
    }

    /// Return to the previous step without validating anything.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CannotGoBack` on `Contact` and `Success`, and
    /// `CheckoutError::AlreadyProcessing` while a payment is in flight.
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        let previous = self
            .step
            .previous()
            .ok_or(CheckoutError::CannotGoBack(self.step))?;
        self.step = previous;
        tracing::debug!(step = %previous, "Checkout went back");
        Ok(previous)
    }

    /// Subtotal, shipping, and total computed from the cart as it is now.
    #[must_use]
    pub fn totals(&self, cart: &CartStore) -> OrderTotals {
        let subtotal = cart.subtotal();
        let shipping = self.shipping.cost();
        OrderTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Enter the processing sub-state.
    ///
    /// Requires the payment step, no submission in flight, and valid
    /// payment fields.
    pub(crate) fn begin_processing(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        self.validate_current()?;
        self.processing = true;
        Ok(())
    }

    /// Leave the processing sub-state after a rejected payment.
    pub(crate) const fn abort_processing(&mut self) {
        self.processing = false;
    }

    /// Record the receipt and move to `Success`.
    pub(crate) fn complete(&mut self, confirmation: OrderConfirmation) {
        self.processing = false;
        self.step = CheckoutStep::Success;
        self.confirmation = Some(confirmation);
    }

    /// Consume the session, yielding the receipt if it reached `Success`.
    pub(crate) fn into_confirmation(self) -> Option<OrderConfirmation> {
        self.confirmation
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn validate_current(&self) -> Result<(), CheckoutError> {
        let fields = self.invalid_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Validation {
                step: self.step,
                fields,
            })
        }
    }
}
