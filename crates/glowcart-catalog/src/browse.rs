//! Client-side catalog view: listing preparation, search refinement, and
//! stale-result discarding for superseded loads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glowcart_core::{Category, Product};
use rand::seq::SliceRandom;

use crate::client::MakeupClient;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load products from API.";

/// The storefront category selector: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = glowcart_core::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// What the user asked to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    pub filter: CategoryFilter,
    /// Free-text search; sent to the API as a name filter and re-applied
    /// locally.
    pub search: String,
}

impl BrowseQuery {
    fn remote_query(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|q| !q.is_empty())
    }
}

/// Drops products without an image and shuffles when the filter is
/// [`CategoryFilter::All`]. A specific category keeps fetch order.
#[must_use]
pub fn prepare_listing(products: Vec<Product>, filter: CategoryFilter) -> Vec<Product> {
    let mut listing: Vec<Product> = products.into_iter().filter(Product::has_image).collect();
    if filter == CategoryFilter::All {
        listing.shuffle(&mut rand::rng());
    }
    listing
}

/// Applies category refinement, search and the favorites-only view to a
/// prepared listing.
///
/// Search matches a case-insensitive substring of the name, or an exact
/// category keyword (`"lips"` matches every lips product).
pub fn refine<F>(
    products: &[Product],
    query: &BrowseQuery,
    is_favorite: F,
    show_only_favorites: bool,
) -> Vec<Product>
where
    F: Fn(i64) -> bool,
{
    let needle = query.search.trim().to_lowercase();
    let keyword = needle.parse::<Category>().ok();

    products
        .iter()
        .filter(|p| query.filter.admits(p.category))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || keyword == Some(p.category)
        })
        .filter(|p| !show_only_favorites || is_favorite(p.id))
        .cloned()
        .collect()
}

/// Message shown when [`refine`] produced nothing.
#[must_use]
pub fn empty_message(query: &BrowseQuery, show_only_favorites: bool) -> &'static str {
    if show_only_favorites {
        "No favorites found for this search/category."
    } else if !query.search.trim().is_empty() {
        "No products match your search."
    } else {
        "No products in this category yet."
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started before this one finished; its result was dropped.
    Superseded,
}

/// Owns the catalog listing and applies fetch results only if no newer
/// load has started since.
pub struct CatalogBrowser {
    client: MakeupClient,
    generation: AtomicU64,
    state: Mutex<BrowseState>,
}

impl CatalogBrowser {
    #[must_use]
    pub fn new(client: MakeupClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
            state: Mutex::new(BrowseState::default()),
        }
    }

    #[must_use]
    pub fn client(&self) -> &MakeupClient {
        &self.client
    }

    /// Snapshot of the current listing state.
    #[must_use]
    pub fn state(&self) -> BrowseState {
        self.lock_state().clone()
    }

    /// Loads the listing for `query`. Failures leave an empty listing with
    /// [`LOAD_ERROR_MESSAGE`]; they are never returned to the caller.
    pub async fn load(&self, query: &BrowseQuery) -> LoadOutcome {
        let token = self.begin_load();

        let remote_query = query.remote_query();
        let result = match query.filter {
            CategoryFilter::All => self.client.fetch_all_categories(remote_query).await,
            CategoryFilter::Only(category) => {
                self.client
                    .fetch_products_by_category(category, remote_query)
                    .await
            }
        };

        match result {
            Ok(products) => {
                let items = prepare_listing(products, query.filter);
                let count = items.len();
                let outcome = self.finish_load(token, |state| state.items = items);
                if outcome == LoadOutcome::Applied {
                    tracing::debug!(count, "catalog load applied");
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed");
                self.finish_load(token, |state| {
                    state.items.clear();
                    state.error = Some(LOAD_ERROR_MESSAGE.to_owned());
                })
            }
        }
    }

    /// Starts a new generation and marks the listing as loading.
    fn begin_load(&self) -> u64 {
        let mut state = self.lock_state();
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.loading = true;
        state.error = None;
        token
    }

    /// Applies a finished load unless a newer one has begun. The token is
    /// compared under the same lock [`Self::begin_load`] takes.
    fn finish_load(&self, token: u64, apply: impl FnOnce(&mut BrowseState)) -> LoadOutcome {
        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "discarding superseded catalog load");
            return LoadOutcome::Superseded;
        }
        apply(&mut state);
        state.loading = false;
        LoadOutcome::Applied
    }

    fn lock_state(&self) -> MutexGuard<'_, BrowseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
