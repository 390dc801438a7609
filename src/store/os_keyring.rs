//! OS keyring keystore.
//!
//! Stores values in the platform credential store (macOS/iOS Keychain,
//! Windows Credential Manager, Secret Service on Linux) through the
//! `keyring` crate. Entries are filed under a single service name with the
//! store key as the account name, so they are private to the application
//! and need no namespacing.

use super::backend::KeystoreBackend;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use keyring::Entry;

/// Keystore backed by the OS credential store.
///
/// Keyring calls block on platform IPC, so each one runs on the blocking
/// thread pool.
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    /// Creates a keystore filing entries under `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Service name entries are filed under.
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).map_err(|e| anyhow!("keyring init for '{key}': {e}"))
    }

    fn set_sync(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| anyhow!("store '{key}': {e}"))
    }

    fn get_sync(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(anyhow!("load '{key}': {e}")),
        }
    }

    fn delete_sync(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow!("delete '{key}': {e}")),
        }
    }
}

#[async_trait]
impl KeystoreBackend for KeyringBackend {
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let backend = self.clone();
        let key = key.to_string();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || backend.set_sync(&key, &value))
            .await
            .context("Task join error")?
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.get_sync(&key))
            .await
            .context("Task join error")?
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.delete_sync(&key))
            .await
            .context("Task join error")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name() {
        let backend = KeyringBackend::new("ntrl-test");
        assert_eq!(backend.service(), "ntrl-test");
    }

    // Needs a reachable credential store (unlocked Keychain, running
    // Secret Service, ...). Run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_os_keyring_round_trip() {
        let backend = KeyringBackend::new("ntrl-secure-store-test");

        backend.set_item("round-trip", "value").await.unwrap();
        assert_eq!(
            backend.get_item("round-trip").await.unwrap().as_deref(),
            Some("value")
        );

        backend.delete_item("round-trip").await.unwrap();
        assert!(backend.get_item("round-trip").await.unwrap().is_none());

        // Second delete hits NoEntry and must still succeed
        backend.delete_item("round-trip").await.unwrap();
    }
}
