use std::sync::Arc;
use std::time::Duration;

use glowcart_core::AppConfig;

use crate::auth::{AuthStore, Authenticator, SimulatedAuthenticator};
use crate::cart::CartStore;
use crate::favorites::FavoritesStore;
use crate::storage::{FileStorage, KeyValueStorage};
use crate::StorageError;

/// The three client stores, restored from one storage backend.
pub struct AppState {
    pub favorites: FavoritesStore,
    pub cart: CartStore,
    pub auth: AuthStore,
}

impl AppState {
    /// Restores every store. Never fails: unreadable entries load as empty.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>, authenticator: Arc<dyn Authenticator>) -> Self {
        let state = Self {
            favorites: FavoritesStore::load(Arc::clone(&storage)),
            cart: CartStore::load(Arc::clone(&storage)),
            auth: AuthStore::load(storage, authenticator),
        };
        tracing::debug!(
            favorites = state.favorites.len(),
            cart_lines = state.cart.items().len(),
            signed_in = state.auth.is_authenticated(),
            "state restored"
        );
        state
    }

    /// File-backed state under `config.data_dir` with the simulated
    /// credential service.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the data directory cannot be created.
    pub fn open(config: &AppConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        let authenticator =
            SimulatedAuthenticator::new(Duration::from_millis(config.auth_delay_ms));
        Ok(Self::load(Arc::new(storage), Arc::new(authenticator)))
    }
}
