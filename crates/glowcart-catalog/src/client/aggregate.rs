//! Fan-out product fetches with deduplication by product ID.

use std::collections::HashMap;

use futures::future::try_join_all;
use glowcart_core::{Category, Product};

use crate::error::CatalogError;
use crate::normalize::normalize_product;

use super::MakeupClient;

impl MakeupClient {
    /// Fetches every tag in `types` concurrently, normalizes each record, and
    /// merges the results deduplicated by product ID.
    ///
    /// **All-or-nothing**: if any per-type request fails, the results of the
    /// others are dropped and the first error is returned.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CatalogError`] from any per-type request.
    pub async fn fetch_by_types(
        &self,
        types: &[&str],
        query: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        tracing::debug!(types = ?types, query, "fetching product types");
        let batches = try_join_all(types.iter().map(|product_type| async move {
            let records = self.fetch_raw_by_type(product_type, query).await?;
            Ok::<_, CatalogError>(records.into_iter().map(normalize_product).collect::<Vec<_>>())
        }))
        .await?;

        Ok(dedupe_by_id(batches.into_iter().flatten()))
    }

    /// Fetches every type tag belonging to `category`.
    ///
    /// # Errors
    ///
    /// See [`MakeupClient::fetch_by_types`].
    pub async fn fetch_products_by_category(
        &self,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.fetch_by_types(category.type_tags(), query).await
    }

    /// Fetches all four categories concurrently and deduplicates across them.
    ///
    /// # Errors
    ///
    /// Fails if any category fetch fails.
    pub async fn fetch_all_categories(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let per_category = try_join_all(
            Category::ALL
                .into_iter()
                .map(|category| self.fetch_products_by_category(category, query)),
        )
        .await?;

        Ok(dedupe_by_id(per_category.into_iter().flatten()))
    }

    /// Fetches one product. Any failure (network, non-2xx, bad JSON) is
    /// logged and reported as "not found".
    pub async fn fetch_product_by_id(&self, id: i64) -> Option<Product> {
        match self.fetch_raw_by_id(id).await {
            Ok(raw) => Some(normalize_product(raw)),
            Err(e) => {
                tracing::warn!(product_id = id, error = %e, "product lookup failed, treating as not found");
                None
            }
        }
    }
}

/// Merges products keyed by `id`. A later duplicate replaces the earlier value
/// but keeps the position where that ID was first seen.
pub(crate) fn dedupe_by_id(products: impl IntoIterator<Item = Product>) -> Vec<Product> {
    let mut positions: HashMap<i64, usize> = HashMap::new();
    let mut merged: Vec<Product> = Vec::new();

    for product in products {
        if let Some(&idx) = positions.get(&product.id) {
            if let Some(slot) = merged.get_mut(idx) {
                *slot = product;
            }
        } else {
            positions.insert(product.id, merged.len());
            merged.push(product);
        }
    }

    merged
}
