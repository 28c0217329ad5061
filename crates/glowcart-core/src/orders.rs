use serde::{Deserialize, Serialize};

/// A cart line. At most one exists per product `id`; `qty` is always `>= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub qty: u32,
}

impl CartItem {
    /// `price_usd * qty`.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price_usd * f64::from(self.qty)
    }
}

/// The product fields a caller supplies when adding to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub id: i64,
    pub name: String,
    pub price_usd: f64,
    pub image: Option<String>,
}

impl From<&crate::Product> for NewCartItem {
    fn from(product: &crate::Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price_usd: product.price_usd,
            image: product.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Pix,
    Boleto,
}

impl PaymentMethod {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit card",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Pix => write!(f, "pix"),
            PaymentMethod::Boleto => write!(f, "boleto"),
        }
    }
}

/// Ephemeral payload carried from checkout to the confirmation view.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: u32,
    pub total: f64,
    pub payment_method: PaymentMethod,
}
