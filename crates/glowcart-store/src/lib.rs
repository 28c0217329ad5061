//! Client-side state for the storefront: favorites, cart and session
//! stores backed by durable per-device key-value storage, plus the checkout
//! flow and route guard built on top of them.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod guard;
pub mod persist;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

pub use auth::{
    validate_login, validate_registration, AuthError, AuthStore, Authenticator,
    SimulatedAuthenticator,
};
pub use cart::{normalize_stored_items, CartStore};
pub use checkout::{
    confirmation_view, place_order, CardDetails, CheckoutError, CheckoutForm, ConfirmationView,
};
pub use favorites::FavoritesStore;
pub use guard::{is_protected, post_login_destination, require_auth, RouteDecision, LOGIN_PATH};
pub use state::AppState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error for key \"{key}\": {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open storage directory {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key \"{key}\" is not valid JSON: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize value for key \"{key}\": {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
}
