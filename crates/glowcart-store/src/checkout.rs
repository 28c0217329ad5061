//! Mock checkout: form validation, simulated order placement, and the
//! confirmation view. No payment is processed.

use std::sync::LazyLock;
use std::time::Duration;

use glowcart_core::{AuthUser, OrderConfirmation, PaymentMethod};
use regex::Regex;
use thiserror::Error;

use crate::cart::CartStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please provide a valid card holder, number, expiry (MM/YY) and CVC.")]
    InvalidCard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub holder: String,
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub line1: String,
    pub city: String,
    pub zip: String,
    pub payment: PaymentMethod,
    pub card: CardDetails,
}

impl CheckoutForm {
    /// Empty form with name and email taken from the signed-in user.
    #[must_use]
    pub fn prefilled(user: Option<&AuthUser>) -> Self {
        Self {
            full_name: user.map(|u| u.name.clone()).unwrap_or_default(),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// The first failing rule, as a [`CheckoutError`] whose `Display` is the
    /// message to show.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            &self.full_name,
            &self.email,
            &self.line1,
            &self.city,
            &self.zip,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(CheckoutError::MissingFields);
        }
        if self.payment == PaymentMethod::Card && !self.card.is_valid() {
            return Err(CheckoutError::InvalidCard);
        }
        Ok(())
    }
}

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("valid non-digit regex"));
static EXPIRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("valid expiry regex"));
static CVC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("valid cvc regex"));

impl CardDetails {
    fn is_valid(&self) -> bool {
        let digits = NON_DIGIT.replace_all(&self.number, "");
        !self.holder.trim().is_empty()
            && (13..=19).contains(&digits.len())
            && EXPIRY.is_match(self.expiry.trim())
            && CVC.is_match(self.cvc.trim())
    }
}

/// Validates the form, simulates processing for `processing_delay`, clears
/// the cart, and returns the confirmation payload for the next view.
///
/// # Errors
///
/// [`CheckoutError::EmptyCart`] if there is nothing to buy, otherwise the
/// first validation failure. The cart is untouched on error.
pub async fn place_order(
    cart: &mut CartStore,
    form: &CheckoutForm,
    processing_delay: Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate()?;

    let total = cart.subtotal();
    tokio::time::sleep(processing_delay).await;

    let order_id = rand::random_range(100_000..=999_999);
    cart.clear();
    tracing::info!(order_id, total, payment = %form.payment, "order placed");

    Ok(OrderConfirmation {
        order_id,
        total,
        payment_method: form.payment,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
    pub title: String,
    pub lines: Vec<String>,
}

/// Renders the confirmation page. Without a payload (direct navigation or
/// a restart) only the generic success message is shown.
#[must_use]
pub fn confirmation_view(payload: Option<&OrderConfirmation>) -> ConfirmationView {
    match payload {
        None => ConfirmationView {
            title: "Order placed".to_owned(),
            lines: vec!["Your order has been placed successfully.".to_owned()],
        },
        Some(order) => ConfirmationView {
            title: "Thank you for your purchase!".to_owned(),
            lines: vec![
                format!("Order #{} confirmed.", order.order_id),
                format!("Total paid: $ {:.2}", order.total),
                format!("Payment method: {}", order.payment_method.label()),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glowcart_core::NewCartItem;

    use super::*;
    use crate::storage::MemoryStorage;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ana Souza".to_owned(),
            email: "ana@example.com".to_owned(),
            line1: "Rua A, 10".to_owned(),
            city: "Recife".to_owned(),
            zip: "50000-000".to_owned(),
            payment: PaymentMethod::Card,
            card: CardDetails {
                holder: "ANA SOUZA".to_owned(),
                number: "4111 1111 1111 1111".to_owned(),
                expiry: "12/29".to_owned(),
                cvc: "123".to_owned(),
            },
        }
    }

    fn cart_with_items() -> CartStore {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::new()));
        cart.add(
            NewCartItem {
                id: 1,
                name: "Lipstick".to_owned(),
                price_usd: 10.0,
                image: None,
            },
            2,
        );
        cart
    }

    #[test]
    fn prefilled_form_uses_user() {
        let user = AuthUser {
            name: "ana".to_owned(),
            email: "ana@example.com".to_owned(),
        };
        let form = CheckoutForm::prefilled(Some(&user));
        assert_eq!(form.full_name, "ana");
        assert_eq!(form.email, "ana@example.com");
        assert!(form.line1.is_empty());
        assert_eq!(CheckoutForm::prefilled(None), CheckoutForm::default());
    }

    #[test]
    fn missing_address_field_is_rejected() {
        let mut form = valid_form();
        form.city.clear();
        assert_eq!(form.validate(), Err(CheckoutError::MissingFields));
    }

    #[test]
    fn card_rules() {
        let mut form = valid_form();
        assert!(form.validate().is_ok());

        form.card.number = "4111 1111".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));

        form = valid_form();
        form.card.expiry = "1229".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));

        form = valid_form();
        form.card.cvc = "12a".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));

        form = valid_form();
        form.card.holder = "  ".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));
    }

    #[test]
    fn card_number_ignores_separators_and_cvc_allows_four_digits() {
        let mut form = valid_form();
        form.card.number = "3782-822463-10005".to_owned();
        form.card.cvc = "1234".to_owned();
        assert!(form.validate().is_ok());

        form.card.expiry = "12/2029".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));

        form = valid_form();
        form.card.number = "4111 1111 1111 1111 1111".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));

        form = valid_form();
        form.card.cvc = "12345".to_owned();
        assert_eq!(form.validate(), Err(CheckoutError::InvalidCard));
    }

    #[test]
    fn non_card_payment_skips_card_rules() {
        let mut form = valid_form();
        form.payment = PaymentMethod::Pix;
        form.card = CardDetails::default();
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn place_order_clears_cart_and_returns_payload() {
        let mut cart = cart_with_items();
        let order = place_order(&mut cart, &valid_form(), Duration::ZERO)
            .await
            .unwrap();

        assert!((100_000..=999_999).contains(&order.order_id));
        assert!((order.total - 20.0).abs() < f64::EPSILON);
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn place_order_rejects_empty_cart() {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::new()));
        let result = place_order(&mut cart, &valid_form(), Duration::ZERO).await;
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn invalid_form_leaves_cart_untouched() {
        let mut cart = cart_with_items();
        let mut form = valid_form();
        form.zip.clear();
        let result = place_order(&mut cart, &form, Duration::ZERO).await;
        assert_eq!(result, Err(CheckoutError::MissingFields));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn confirmation_without_payload_is_generic() {
        let view = confirmation_view(None);
        assert_eq!(view.title, "Order placed");
        assert_eq!(view.lines, vec!["Your order has been placed successfully."]);
        assert!(view.lines.iter().all(|l| !l.contains("Order #")));
    }

    #[test]
    fn confirmation_with_payload_shows_order_details() {
        let order = OrderConfirmation {
            order_id: 123_456,
            total: 20.5,
            payment_method: PaymentMethod::Boleto,
        };
        let view = confirmation_view(Some(&order));
        assert_eq!(view.title, "Thank you for your purchase!");
        assert_eq!(
            view.lines,
            vec![
                "Order #123456 confirmed.",
                "Total paid: $ 20.50",
                "Payment method: Boleto"
            ]
        );
    }
}
