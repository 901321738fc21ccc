//! Checkout steps and shipping options.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use zaziza_core::Price;

/// A stage of the linear contact → shipping → payment → success flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Contact,
    Shipping,
    Payment,
    Success,
}

impl CheckoutStep {
    /// The step a successful forward transition leads to.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Contact => Some(Self::Shipping),
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Success),
            Self::Success => None,
        }
    }

    /// The step a backward transition leads to.
    ///
    /// `Contact` has nowhere to go back to and `Success` is terminal.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Contact),
            Self::Payment => Some(Self::Shipping),
            Self::Contact | Self::Success => None,
        }
    }

    /// Position in the step indicator (1-3); the success screen has none.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::Contact => Some(1),
            Self::Shipping => Some(2),
            Self::Payment => Some(3),
            Self::Success => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Success => "Success",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery option chosen at the shipping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Free delivery.
    #[default]
    Standard,
    /// Flat 25.00 surcharge.
    Express,
}

impl ShippingMethod {
    #[must_use]
    pub fn cost(self) -> Price {
        match self {
            Self::Standard => Price::zero(),
            Self::Express => Price::usd(Decimal::new(2500, 2)),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
        }
    }

    /// `Free` for a zero cost, otherwise the formatted price.
    #[must_use]
    pub fn cost_label(self) -> String {
        let cost = self.cost();
        if cost.is_zero() {
            "Free".to_string()
        } else {
            cost.to_string()
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
