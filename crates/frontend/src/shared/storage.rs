//! Key-value persistence for small pieces of UI state.
//!
//! Components receive a `KeyValueStore` instead of touching `localStorage`
//! directly, so tests can run against `MemoryStore`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use web_sys::window;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Js(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Best-effort string store. Callers decide how to react to failures.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser `window.localStorage`.
///
/// The storage handle is looked up on every call, the type itself holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn get_local_storage() -> Result<web_sys::Storage, StorageError> {
    window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|e| StorageError::Js(format!("{:?}", e)))?
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        get_local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Js(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        get_local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Js(format!("{:?}", e)))
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`, without going through the trait.
    #[cfg(test)]
    pub(crate) fn peek(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local storage in the browser, an in-memory map anywhere else.
pub fn default_store() -> Arc<dyn KeyValueStore> {
    if get_local_storage().is_ok() {
        Arc::new(LocalStorage)
    } else {
        log::warn!("localStorage unavailable, UI state will not survive reloads");
        Arc::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a"), Ok(None));

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a"), Ok(Some("2".to_string())));
        assert_eq!(store.peek("b"), None);
    }

    #[test]
    fn test_memory_store_clones_share_items() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.set("key", "value").unwrap();
        assert_eq!(store.peek("key").as_deref(), Some("value"));
    }
}
