//! The checkout command: guard, form, order, confirmation.

use std::time::Duration;

use glowcart_store::{
    confirmation_view, place_order, require_auth, AppState, CardDetails, CheckoutForm,
    RouteDecision,
};

use crate::CheckoutArgs;

const CHECKOUT_PATH: &str = "/checkout";
const PROCESSING_DELAY: Duration = Duration::from_millis(800);

/// # Errors
///
/// Fails when nobody is signed in, the cart is empty, or the form does not
/// validate. The cart is only cleared on success.
pub(crate) async fn run_checkout(state: &mut AppState, args: CheckoutArgs) -> anyhow::Result<()> {
    if let RouteDecision::RedirectToLogin { from } = require_auth(&state.auth, CHECKOUT_PATH) {
        anyhow::bail!("sign in required: run `glowcart login --from {from}` first");
    }

    let form = build_form(state, args);
    let order = place_order(&mut state.cart, &form, PROCESSING_DELAY).await?;

    let view = confirmation_view(Some(&order));
    println!("{}", view.title);
    for line in view.lines {
        println!("  {line}");
    }
    Ok(())
}

pub(crate) fn build_form(state: &AppState, args: CheckoutArgs) -> CheckoutForm {
    let prefilled = CheckoutForm::prefilled(state.auth.user());
    CheckoutForm {
        full_name: args.full_name.unwrap_or(prefilled.full_name),
        email: args.email.unwrap_or(prefilled.email),
        line1: args.line1,
        city: args.city,
        zip: args.zip,
        payment: args.payment.into(),
        card: CardDetails {
            holder: args.card_holder,
            number: args.card_number,
            expiry: args.card_expiry,
            cvc: args.card_cvc,
        },
    }
}
