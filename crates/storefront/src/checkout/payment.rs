//! Payment confirmation.
//!
//! There is no real gateway. [`SimulatedPaymentProcessor`] stands in for the
//! round trip with a fixed delay and always approves.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use zaziza_core::Price;

/// Why a payment was not confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("card declined")]
    Declined,

    #[error("payment service unavailable: {0}")]
    Unavailable(String),
}

/// What is sent for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Price,
    pub card_last4: String,
    pub cardholder_name: String,
}

/// Confirms a payment out of band.
pub trait PaymentProcessor: Send + Sync {
    /// Resolve once the payment is approved or rejected.
    fn confirm(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<(), PaymentError>> + Send;
}

/// Waits for a fixed delay, then approves.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPaymentProcessor {
    delay: Duration,
}

impl SimulatedPaymentProcessor {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl PaymentProcessor for SimulatedPaymentProcessor {
    async fn confirm(&self, request: &PaymentRequest) -> Result<(), PaymentError> {
        tracing::info!(
            amount = %request.amount,
            card = %request.card_last4,
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "Confirming simulated payment"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
