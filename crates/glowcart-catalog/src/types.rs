//! Wire types for the public Makeup API (`makeup-api.herokuapp.com`).
//!
//! ## Observed shape
//!
//! ### `price`
//! Usually a decimal string (`"12.50"`), sometimes a bare JSON number, and
//! `null` for a noticeable share of records. Modeled as `Option<RawPrice>`;
//! normalization turns anything unparsable into `0.0`.
//!
//! ### `image_link`
//! Frequently served over plain `http://`, occasionally empty or padded with
//! whitespace. Normalized in `normalize.rs`.
//!
//! ### `product_type`
//! Snake-case tag such as `"lip_liner"` or `"nail_polish"`. May be `null`.
//!
//! Records carry many more fields (brand, description, colors, ratings); serde
//! ignores them.

use serde::Deserialize;

/// One product record as returned by `GET /products.json` or
/// `GET /products/{id}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MakeupApiProduct {
    /// Remote numeric product ID.
    pub id: i64,

    /// Display name. Treated as empty when `null` or absent.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<RawPrice>,

    #[serde(default)]
    pub image_link: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,
}

/// The API is inconsistent about whether prices are strings or numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}
