use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::cart::{as_number, integral_id};
use crate::persist;
use crate::storage::KeyValueStorage;

pub const FAVORITES_KEY: &str = "favorite-ids";

/// Favorited product IDs plus the session-only "show only favorites" flag.
///
/// The ID set is persisted on every mutation; the flag is not.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    ids: HashSet<i64>,
    show_only_favorites: bool,
}

impl FavoritesStore {
    /// Loads the stored ID set. Missing or corrupt data yields an empty set;
    /// entries that are not whole non-zero numbers are skipped one by one.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let raw: Value = persist::load_or_default(storage.as_ref(), FAVORITES_KEY);
        let ids = raw
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| as_number(entry).and_then(integral_id))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            storage,
            ids,
            show_only_favorites: false,
        }
    }

    #[must_use]
    pub fn has(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id` if absent, removes it if present. Returns the new membership.
    pub fn toggle(&mut self, id: i64) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist();
        now_favorite
    }

    #[must_use]
    pub fn show_only_favorites(&self) -> bool {
        self.show_only_favorites
    }

    pub fn toggle_filter(&mut self) {
        self.show_only_favorites = !self.show_only_favorites;
        self.persist();
    }

    /// Forces the filter on (dedicated favorites view) or off (general catalog).
    pub fn set_only_favorites(&mut self, value: bool) {
        self.show_only_favorites = value;
        self.persist();
    }

    /// Favorited IDs in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        persist::save(self.storage.as_ref(), FAVORITES_KEY, &self.ids());
    }
}
