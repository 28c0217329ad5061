//! Normalization from raw Makeup API records to [`glowcart_core::Product`].
//!
//! Every record normalizes; no missing field is fatal. Classification into a
//! [`Category`] is best-effort and lossy.

use glowcart_core::{Category, Product};

use crate::types::{MakeupApiProduct, RawPrice};

/// Category assigned when the `product_type` tag is absent or unmapped.
pub const FALLBACK_CATEGORY: Category = Category::Eyes;

/// Normalizes a raw [`MakeupApiProduct`] into a [`Product`].
#[must_use]
pub fn normalize_product(raw: MakeupApiProduct) -> Product {
    let category = resolve_category(raw.product_type.as_deref());
    Product {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        price_usd: normalize_price(raw.price.as_ref()),
        image: normalize_image(raw.image_link.as_deref()),
        category,
    }
}

/// Parses a remote price into non-negative US dollars.
///
/// Absent, unparsable, non-finite or negative values all yield `0.0`.
#[must_use]
pub fn normalize_price(price: Option<&RawPrice>) -> f64 {
    let parsed = match price {
        Some(RawPrice::Number(n)) => Some(*n),
        Some(RawPrice::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    parsed
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}

/// Maps a remote `product_type` tag to a category, defaulting to
/// [`FALLBACK_CATEGORY`].
#[must_use]
pub fn resolve_category(product_type: Option<&str>) -> Category {
    product_type
        .and_then(Category::from_type_tag)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Trims the image URL, drops empty values, and upgrades `http://` to
/// `https://` so the storefront never mixes content.
#[must_use]
pub fn normalize_image(image_link: Option<&str>) -> Option<String> {
    let trimmed = image_link.map(str::trim).filter(|s| !s.is_empty())?;

    let scheme_len = "http://".len();
    match trimmed.get(..scheme_len) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            Some(format!("https://{}", &trimmed[scheme_len..]))
        }
        _ => Some(trimmed.to_owned()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
