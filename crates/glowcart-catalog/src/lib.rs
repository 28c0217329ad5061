pub mod browse;
pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use browse::{
    empty_message, prepare_listing, refine, BrowseQuery, BrowseState, CatalogBrowser,
    CategoryFilter, LoadOutcome, LOAD_ERROR_MESSAGE,
};
pub use client::MakeupClient;
pub use error::CatalogError;
pub use normalize::{normalize_image, normalize_price, normalize_product, resolve_category};
pub use types::{MakeupApiProduct, RawPrice};
