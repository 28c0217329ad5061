//! Load-then-validate and best-effort save helpers shared by every store.
//!
//! Loading is explicit: [`load`] returns a `Result<Option<T>>`, and
//! [`load_or_default`] collapses the failure branch into the store's default
//! after logging it. Saving never fails the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::KeyValueStorage;
use crate::StorageError;

/// Reads and deserializes `key`. `Ok(None)` means the key is absent.
///
/// # Errors
///
/// [`StorageError::Deserialize`] for corrupt values, or any backend error.
pub fn load<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Deserialize {
            key: key.to_owned(),
            source: e,
        })
}

/// Like [`load`], but absent or unreadable values yield `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> T {
    match load(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored value");
            T::default()
        }
    }
}

/// Serializes and writes `value`. Failures (quota, read-only profile) are
/// logged and ignored.
pub fn save<T: Serialize + ?Sized>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialize {
            key: key.to_owned(),
            source: e,
        })
        .and_then(|raw| storage.set(key, &raw));
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "failed to persist value");
    }
}

/// Deletes `key`, logging and ignoring failures.
pub fn remove(storage: &dyn KeyValueStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        tracing::warn!(key, error = %e, "failed to remove stored value");
    }
}
