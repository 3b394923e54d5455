//! `window.localStorage` as a key-value store.

use iflow_client::KeyValueStore;
use iflow_types::StorageError;

/// Handle to the page's `localStorage`; looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window()
        .ok_or_else(|| StorageError::Unavailable { message: "no window".to_string() })?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable { message: format!("{:?}", e) })?
        .ok_or_else(|| StorageError::Unavailable { message: "localStorage disabled".to_string() })
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read { key: key.to_string(), message: format!("{:?}", e) })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota exceeded surfaces here
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write { key: key.to_string(), message: format!("{:?}", e) })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write { key: key.to_string(), message: format!("{:?}", e) })
    }
}
