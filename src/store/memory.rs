//! In-memory backends.
//!
//! Non-persistent stand-ins for both platform stores. Ideal for testing,
//! development and embedding where no OS keystore is reachable.

use super::backend::{KeystoreBackend, LocalStorage};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory keystore using DashMap.
///
/// `MemoryKeystore` is `Clone`; clones share the same entries, so a test
/// can keep a handle and inspect what the facade wrote.
#[derive(Clone, Default)]
pub struct MemoryKeystore {
    data: Arc<DashMap<String, String>>,
}

impl MemoryKeystore {
    /// Creates a new empty keystore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the keystore holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw stored value for `key`, bypassing the async API.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.get(key).map(|v| v.value().clone())
    }
}

#[async_trait]
impl KeystoreBackend for MemoryKeystore {
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}

/// In-memory local storage with ordered keys.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryLocalStorage {
    data: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryLocalStorage {
    /// Creates a new empty local storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all entries, like a browser "clear site data".
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl LocalStorage for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keystore_set_get() {
        let keystore = MemoryKeystore::new();

        keystore.set_item("key1", "value1").await.unwrap();
        let value = keystore.get_item("key1").await.unwrap();
        assert_eq!(value.as_deref(), Some("value1"));
    }

    #[tokio::test]
    async fn test_keystore_delete_nonexistent() {
        let keystore = MemoryKeystore::new();
        keystore.delete_item("nonexistent").await.unwrap();
        assert!(keystore.is_empty());
    }

    #[tokio::test]
    async fn test_keystore_clones_share_entries() {
        let keystore = MemoryKeystore::new();
        let handle = keystore.clone();

        keystore.set_item("shared", "yes").await.unwrap();
        assert_eq!(handle.raw("shared").as_deref(), Some("yes"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_local_overwrite_and_remove() {
        let storage = MemoryLocalStorage::new();

        storage.set_item("key", "value1").unwrap();
        storage.set_item("key", "value2").unwrap();
        assert_eq!(storage.get_item("key").unwrap().as_deref(), Some("value2"));

        storage.remove_item("key").unwrap();
        assert!(storage.get_item("key").unwrap().is_none());
    }

    #[test]
    fn test_local_keys_are_sorted() {
        let storage = MemoryLocalStorage::new();
        storage.set_item("b", "2").unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("c", "3").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_local_clear() {
        let storage = MemoryLocalStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.clear();
        assert!(storage.keys().unwrap().is_empty());
    }
}
