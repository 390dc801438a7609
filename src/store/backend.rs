//! Backend traits for the secure store.
//!
//! Two platform stores sit behind the facade, with deliberately different
//! shapes: the encrypted keystore is asynchronous, the browser-local store
//! is synchronous. Both deal only in strings.

use anyhow::Result;
use async_trait::async_trait;

/// OS-level encrypted key-value store.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Every operation may fail; the facade decides which failures reach
/// callers.
///
/// # Example
///
/// ```ignore
/// use ntrl_secure_store::{KeystoreBackend, MemoryKeystore};
///
/// let keystore = MemoryKeystore::new();
/// keystore.set_item("token", "abc").await?;
/// assert_eq!(keystore.get_item("token").await?, Some("abc".to_string()));
/// ```
#[async_trait]
pub trait KeystoreBackend: Send + Sync + 'static {
    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore is unavailable or rejects the write.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieves the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been set or was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore fails to delete an existing entry.
    async fn delete_item(&self, key: &str) -> Result<()>;
}

/// Origin-scoped persistent string store, shaped like web `localStorage`.
///
/// Keys passed here are physical keys: namespacing is applied by the
/// facade before they reach the backend.
pub trait LocalStorage: Send + Sync + 'static {
    /// Returns the value for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected (quota, IO failure).
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails to remove the entry.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Lists every physically stored key, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be enumerated.
    fn keys(&self) -> Result<Vec<String>>;
}
