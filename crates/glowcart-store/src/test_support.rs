use crate::storage::KeyValueStorage;
use crate::StorageError;

/// Storage whose reads return a fixed value and whose writes always fail,
/// standing in for a full or read-only profile.
pub(crate) struct FailingStorage {
    pub(crate) value: Option<String>,
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_owned(),
            source: std::io::Error::other("quota exceeded"),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_owned(),
            source: std::io::Error::other("quota exceeded"),
        })
    }
}
