//! Non-interactive checkout.
//!
//! Fills every step from the command line and runs the full flow. The first
//! step that fails validation stops the run; the presenter has already
//! logged which fields were flagged.

use clap::Args;
use zaziza_storefront::Storefront;
use zaziza_storefront::checkout::{CheckoutError, ShippingMethod, SimulatedPaymentProcessor};

#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    postal_code: String,

    /// Express delivery (+$25.00) instead of free standard shipping
    #[arg(long)]
    express: bool,

    #[arg(long)]
    card_number: String,

    /// `MM/YY`
    #[arg(long)]
    expiry: String,

    #[arg(long)]
    cvc: String,

    #[arg(long)]
    cardholder: String,
}

/// Run checkout end to end. The session is always closed before returning.
///
/// # Errors
///
/// Returns the first `CheckoutError` the flow raises.
pub async fn run(storefront: &mut Storefront, args: CheckoutArgs) -> Result<(), CheckoutError> {
    let result = place_order(storefront, args).await;
    storefront.close_checkout();
    result
}

async fn place_order(storefront: &mut Storefront, args: CheckoutArgs) -> Result<(), CheckoutError> {
    let contact = storefront.start_checkout()?.contact_mut();
    contact.email = args.email;
    contact.first_name = args.first_name;
    contact.last_name = args.last_name;
    contact.address = args.address;
    contact.city = args.city;
    contact.postal_code = args.postal_code;
    storefront.advance_checkout()?;

    if args.express {
        storefront.select_shipping(ShippingMethod::Express)?;
    }
    storefront.advance_checkout()?;

    let payment = storefront
        .checkout_mut()
        .ok_or(CheckoutError::NoSession)?
        .payment_mut();
    payment.set_card_number(&args.card_number);
    payment.set_expiry(&args.expiry);
    payment.set_cvc(&args.cvc);
    payment.set_cardholder_name(&args.cardholder);

    if let Some(totals) = storefront.order_totals() {
        tracing::info!(
            subtotal = %totals.subtotal,
            shipping = %totals.shipping,
            "Total {}",
            totals.total
        );
    }

    let processor = SimulatedPaymentProcessor::new(storefront.config().payment_delay);
    let confirmation = storefront.process_payment(&processor).await?;
    tracing::info!(
        reference = %confirmation.reference,
        email = %confirmation.email,
        total = %confirmation.total,
        "Thank you for your order"
    );
    Ok(())
}
