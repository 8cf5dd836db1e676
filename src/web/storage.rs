//! `window.localStorage` as a [`KeyValueStore`].

use web_sys::{Storage, window};

use crate::error::StorageError;
use crate::settings::KeyValueStore;

/// Browser local storage. Private browsing or a sandboxed iframe can make it
/// unavailable, in which case every call reports [`StorageError::Unavailable`].
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        Self {
            storage: window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}
