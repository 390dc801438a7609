//! The `SecureStore` facade.
//!
//! One asynchronous key-value contract over whichever backend the host
//! platform supplies. Writes are loud, reads and deletes are quiet:
//!
//! | Operation  | Backend failure becomes        |
//! |------------|--------------------------------|
//! | `set`      | `Err(StoreError::Write)`       |
//! | `get`      | `None` (logged)                |
//! | `delete`   | nothing (logged)               |
//! | `get_json` | `None` on read or decode error |

use super::backend::{KeystoreBackend, LocalStorage};
use super::local::RedbLocalStorage;
use super::os_keyring::KeyringBackend;
use super::platform::BackendKind;
use crate::config::Config;
use crate::constants::{LOCAL_KEY_PREFIX, PROBE_KEY, PROBE_VALUE, SOFT_LIMIT_BYTES};
use crate::error::{Result, StoreError};
use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Backend chosen for a store, fixed at construction.
#[derive(Clone)]
pub enum Backend {
    /// Encrypted OS keystore; keys are stored as given.
    Keystore(Arc<dyn KeystoreBackend>),
    /// Browser-local storage; keys are stored under [`LOCAL_KEY_PREFIX`].
    Local(Arc<dyn LocalStorage>),
}

impl Backend {
    /// Kind of backend wrapped.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Keystore(_) => BackendKind::Keystore,
            Self::Local(_) => BackendKind::Local,
        }
    }
}

/// Secure key-value store handle.
///
/// Cheap to clone; clones share the backend. Pass it through application
/// wiring instead of reaching for a global.
///
/// Operations on the same key are not ordered against each other: await a
/// write before reading it back. Racing writers resolve last-completion-wins.
///
/// # Example
///
/// ```ignore
/// use ntrl_secure_store::{MemoryKeystore, SecureStore};
///
/// let store = SecureStore::keystore(MemoryKeystore::new());
/// store.set("token", "abc").await?;
/// assert_eq!(store.get("token").await.as_deref(), Some("abc"));
/// ```
#[derive(Clone)]
pub struct SecureStore {
    backend: Backend,
}

impl SecureStore {
    /// Creates a store over an explicit backend.
    pub fn new(backend: Backend) -> Self {
        debug!(backend = %backend.kind(), "Secure store initialized");
        Self { backend }
    }

    /// Creates a store over an encrypted keystore.
    pub fn keystore<K: KeystoreBackend>(keystore: K) -> Self {
        Self::new(Backend::Keystore(Arc::new(keystore)))
    }

    /// Creates a store over browser-local storage.
    pub fn local<S: LocalStorage>(storage: S) -> Self {
        Self::new(Backend::Local(Arc::new(storage)))
    }

    /// Creates the store the configured platform calls for.
    ///
    /// The web gets a redb file at the configured local path; every other
    /// platform gets the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if the local path cannot be resolved or the local
    /// store file cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let platform = config.platform();
        match platform.backend_kind() {
            BackendKind::Keystore => {
                debug!(%platform, service = %config.store.keyring_service, "Using OS keyring");
                Ok(Self::keystore(KeyringBackend::new(
                    config.store.keyring_service.clone(),
                )))
            },
            BackendKind::Local => {
                let path = config.local_path()?;
                debug!(%platform, path = %path.display(), "Using local storage");
                let storage =
                    RedbLocalStorage::open(&path).map_err(|e| StoreError::open(&path, e))?;
                Ok(Self::local(storage))
            },
        }
    }

    /// Kind of backend this store writes to.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend write fails; the value
    /// was not persisted.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let outcome = match &self.backend {
            Backend::Keystore(keystore) => keystore.set_item(key, value).await,
            Backend::Local(storage) => {
                let physical = local_key(key);
                let value = value.to_string();
                run_local(storage, move |s| s.set_item(&physical, &value)).await
            },
        };

        outcome.map_err(|e| StoreError::write(key, e))
    }

    /// Returns the value stored under `key`.
    ///
    /// `None` covers never set, deleted, and unreadable alike.
    pub async fn get(&self, key: &str) -> Option<String> {
        let outcome = match &self.backend {
            Backend::Keystore(keystore) => keystore.get_item(key).await,
            Backend::Local(storage) => {
                let physical = local_key(key);
                run_local(storage, move |s| s.get_item(&physical)).await
            },
        };

        match outcome {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Secure store read failed, treating as not found");
                None
            },
        }
    }

    /// Removes `key`. Best effort: failures are logged, never returned.
    pub async fn delete(&self, key: &str) {
        let outcome = match &self.backend {
            Backend::Keystore(keystore) => keystore.delete_item(key).await,
            Backend::Local(storage) => {
                let physical = local_key(key);
                run_local(storage, move |s| s.remove_item(&physical)).await
            },
        };

        if let Err(e) = outcome {
            warn!(key, error = %e, "Secure store delete failed");
        }
    }

    /// Reports whether the backend can currently store values.
    ///
    /// Local storage is available once constructed. The keystore is probed
    /// with a real write/read/delete of a sentinel, since a keystore can be
    /// present yet locked or corrupted.
    pub async fn is_available(&self) -> bool {
        match &self.backend {
            Backend::Local(_) => true,
            Backend::Keystore(keystore) => {
                let available = probe_keystore(keystore.as_ref()).await;
                debug!(available, "Keystore probe finished");
                available
            },
        }
    }

    /// Serializes `value` as JSON and stores it under `key`.
    ///
    /// Payloads over [`SOFT_LIMIT_BYTES`] log a warning but are still
    /// written; the backend may reject them on its own.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if `value` cannot be serialized and
    /// [`StoreError::Write`] if the write fails.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        if let Some(advisory) = size_advisory(key, json.len()) {
            warn!(key, size = json.len(), "{advisory}");
        }

        self.set(key, &json).await
    }

    /// Reads `key` and decodes it as JSON.
    ///
    /// Returns `None` when the key is absent, unreadable, or holds text
    /// that does not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value is not valid JSON, treating as not found");
                None
            },
        }
    }

    /// Physical keys held by the local backend, prefix included.
    ///
    /// Returns `None` for keystores, which cannot be enumerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the local backend cannot be enumerated.
    pub async fn local_keys(&self) -> anyhow::Result<Option<Vec<String>>> {
        match &self.backend {
            Backend::Keystore(_) => Ok(None),
            Backend::Local(storage) => run_local(storage, |s| s.keys()).await.map(Some),
        }
    }
}

/// Physical key for `key` in local storage.
pub fn local_key(key: &str) -> String {
    format!("{LOCAL_KEY_PREFIX}{key}")
}

/// Warning text for a JSON payload of `len` bytes, if it is over the soft limit.
pub fn size_advisory(key: &str, len: usize) -> Option<String> {
    (len > SOFT_LIMIT_BYTES).then(|| {
        format!(
            "Value for key '{key}' is {len} bytes, exceeds {SOFT_LIMIT_BYTES} byte limit; \
             writing anyway"
        )
    })
}

/// Runs a synchronous local-storage call on the blocking pool.
async fn run_local<T, F>(storage: &Arc<dyn LocalStorage>, op: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn LocalStorage) -> anyhow::Result<T> + Send + 'static,
{
    let storage = Arc::clone(storage);
    tokio::task::spawn_blocking(move || op(storage.as_ref()))
        .await
        .context("Task join error")?
}

async fn probe_keystore(keystore: &dyn KeystoreBackend) -> bool {
    if let Err(e) = keystore.set_item(PROBE_KEY, PROBE_VALUE).await {
        debug!(error = %e, "Keystore probe write failed");
        return false;
    }

    let read_back = match keystore.get_item(PROBE_KEY).await {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Keystore probe read failed");
            return false;
        },
    };

    if let Err(e) = keystore.delete_item(PROBE_KEY).await {
        debug!(error = %e, "Keystore probe cleanup failed");
        return false;
    }

    read_back.as_deref() == Some(PROBE_VALUE)
}
