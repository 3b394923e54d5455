//! Local key-value persistence.
//!
//! The dashboard keeps two values locally: the full configuration document
//! and a directly entered API key. Browsers back this with `localStorage`,
//! native hosts with [`FileStore`].

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use std::collections::HashMap;
use std::sync::Arc;

use iflow_types::StorageError;
use parking_lot::RwLock;

/// Key holding the JSON-serialized `Configuration`.
pub const CONFIG_KEY: &str = "iflow2api_config";
/// Key holding the directly entered API key.
pub const API_KEY_KEY: &str = "iflow_api_key";

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get(CONFIG_KEY).unwrap().is_none());

        store.set(CONFIG_KEY, "{}").unwrap();
        assert_eq!(store.get(CONFIG_KEY).unwrap().as_deref(), Some("{}"));

        // Clones share contents
        let other = store.clone();
        other.remove(CONFIG_KEY).unwrap();
        assert!(store.is_empty());
        other.remove(CONFIG_KEY).unwrap();
    }
}
