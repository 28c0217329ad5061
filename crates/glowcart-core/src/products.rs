use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four fixed product groupings shown in the storefront.
///
/// A category is always derived from the remote `product_type` tag during
/// normalization; it is never assigned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Eyes,
    Skin,
    Lips,
    Nails,
}

impl Category {
    /// All categories, in the order the storefront fetches them.
    pub const ALL: [Category; 4] = [
        Category::Eyes,
        Category::Skin,
        Category::Lips,
        Category::Nails,
    ];

    /// Remote `product_type` tags that make up this category.
    #[must_use]
    pub fn type_tags(self) -> &'static [&'static str] {
        match self {
            Category::Eyes => &["mascara", "eyeliner", "eyeshadow", "eyebrow"],
            Category::Lips => &["lip_liner", "lipstick"],
            Category::Skin => &[
                "foundation",
                "concealer",
                "powder",
                "bronzer",
                "blush",
                "highlighter",
                "primer",
            ],
            Category::Nails => &["nail_polish"],
        }
    }

    /// Resolves a remote `product_type` tag to its category.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown tags; callers
    /// decide the fallback.
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Option<Category> {
        let tag = tag.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.type_tags().contains(&tag.as_str()))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Eyes => "eyes",
            Category::Skin => "skin",
            Category::Lips => "lips",
            Category::Nails => "nails",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category \"{0}\" (expected eyes, skin, lips or nails)")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eyes" => Ok(Category::Eyes),
            "skin" => Ok(Category::Skin),
            "lips" => Ok(Category::Lips),
            "nails" => Ok(Category::Nails),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}

/// A catalog product, normalized from a remote Makeup API record.
///
/// Immutable once constructed; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Remote-assigned numeric product ID.
    pub id: i64,
    pub name: String,
    /// Price in US dollars. Never negative; `0.0` when the remote price
    /// was absent or unparsable.
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    /// HTTPS image URL, or `None` when the remote record had no usable image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: Category,
}

impl Product {
    /// Returns `true` if the product can be rendered as a catalog card.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
