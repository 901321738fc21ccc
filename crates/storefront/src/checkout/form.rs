//! Contact and payment form state with per-step validation.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use zaziza_core::Email;

use super::format::{digits_only, format_card_number, format_cvc, format_expiry};

/// Minimum number of card digits accepted at the payment step.
pub const MIN_CARD_DIGITS: usize = 13;

/// A form input that can be flagged as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    FirstName,
    LastName,
    Address,
    City,
    PostalCode,
    CardNumber,
    Expiry,
    Cvc,
    CardholderName,
}

impl FormField {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Address => "address",
            Self::City => "city",
            Self::PostalCode => "postal code",
            Self::CardNumber => "card number",
            Self::Expiry => "expiry",
            Self::Cvc => "CVC",
            Self::CardholderName => "cardholder name",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Contact and delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl ContactInfo {
    /// Fields that block the contact step, in form order.
    ///
    /// Every field must be non-blank. With `strict_email` the email must also
    /// parse as an address.
    #[must_use]
    pub fn invalid_fields(&self, strict_email: bool) -> Vec<FormField> {
        let email_ok = if strict_email {
            Email::parse(&self.email).is_ok()
        } else {
            !is_blank(&self.email)
        };

        [
            (FormField::Email, email_ok),
            (FormField::FirstName, !is_blank(&self.first_name)),
            (FormField::LastName, !is_blank(&self.last_name)),
            (FormField::Address, !is_blank(&self.address)),
            (FormField::City, !is_blank(&self.city)),
            (FormField::PostalCode, !is_blank(&self.postal_code)),
        ]
        .into_iter()
        .filter_map(|(field, ok)| (!ok).then_some(field))
        .collect()
    }

    /// First and last name, trimmed and joined.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Card details. The number and CVC never appear in `Debug` output.
///
/// Setters apply live formatting, so the stored number is always the grouped
/// display form and the expiry is always `MM/YY` shaped.
#[derive(Clone)]
pub struct PaymentInfo {
    card_number: SecretString,
    expiry: String,
    cvc: SecretString,
    cardholder_name: String,
}

impl Default for PaymentInfo {
    fn default() -> Self {
        Self {
            card_number: SecretString::from(String::new()),
            expiry: String::new(),
            cvc: SecretString::from(String::new()),
            cardholder_name: String::new(),
        }
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &self.masked_card_number())
            .field("expiry", &self.expiry)
            .field("cvc", &"[REDACTED]")
            .field("cardholder_name", &self.cardholder_name)
            .finish()
    }
}

impl PaymentInfo {
    pub fn set_card_number(&mut self, input: &str) {
        self.card_number = SecretString::from(format_card_number(input));
    }

    pub fn set_expiry(&mut self, input: &str) {
        self.expiry = format_expiry(input);
    }

    pub fn set_cvc(&mut self, input: &str) {
        self.cvc = SecretString::from(format_cvc(input));
    }

    pub fn set_cardholder_name(&mut self, input: &str) {
        input.clone_into(&mut self.cardholder_name);
    }

    /// The grouped card number, for handing to a payment processor.
    #[must_use]
    pub const fn card_number(&self) -> &SecretString {
        &self.card_number
    }

    #[must_use]
    pub fn card_digit_count(&self) -> usize {
        digits_only(self.card_number.expose_secret()).len()
    }

    /// Last four digits, or fewer if not that many were entered.
    #[must_use]
    pub fn card_last4(&self) -> String {
        let digits = digits_only(self.card_number.expose_secret());
        let skip = digits.len().saturating_sub(4);
        digits.chars().skip(skip).collect()
    }

    /// `•••• •••• •••• 4242`, or empty if no number was entered.
    #[must_use]
    pub fn masked_card_number(&self) -> String {
        let last4 = self.card_last4();
        if last4.is_empty() {
            String::new()
        } else {
            format!("•••• •••• •••• {last4}")
        }
    }

    #[must_use]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    #[must_use]
    pub fn cardholder_name(&self) -> &str {
        &self.cardholder_name
    }

    /// Name shown on the card preview.
    #[must_use]
    pub fn display_name(&self) -> String {
        if is_blank(&self.cardholder_name) {
            "YOUR NAME".to_string()
        } else {
            self.cardholder_name.trim().to_uppercase()
        }
    }

    /// Fields that block the payment step, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<FormField> {
        [
            (
                FormField::CardNumber,
                self.card_digit_count() >= MIN_CARD_DIGITS,
            ),
            (FormField::Expiry, !is_blank(&self.expiry)),
            (FormField::Cvc, !is_blank(self.cvc.expose_secret())),
            (FormField::CardholderName, !is_blank(&self.cardholder_name)),
        ]
        .into_iter()
        .filter_map(|(field, ok)| (!ok).then_some(field))
        .collect()
    }
}
