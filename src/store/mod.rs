//! Secure key-value store with platform-selected backends.
//!
//! One asynchronous string store over whichever backend the platform
//! provides:
//!
//! - **KeyringBackend**: OS encrypted credential store (mobile and desktop)
//! - **RedbLocalStorage**: origin-scoped persistent file (web stand-in)
//! - **MemoryKeystore** / **MemoryLocalStorage**: in-process, for tests and embedding
//!
//! # Example
//!
//! ```ignore
//! use ntrl_secure_store::{Config, SecureStore};
//!
//! let store = SecureStore::from_config(&Config::load()?)?;
//! store.set_json("prefs", &prefs).await?;
//! let prefs: Option<Prefs> = store.get_json("prefs").await;
//! ```
//!
//! # Custom Backends
//!
//! Implement `KeystoreBackend` or `LocalStorage` and hand it to
//! `SecureStore::keystore` / `SecureStore::local`.

mod backend;
mod facade;
mod local;
mod memory;
mod os_keyring;
mod platform;


pub use backend::{KeystoreBackend, LocalStorage};
pub use facade::{Backend, SecureStore, local_key, size_advisory};
pub use local::RedbLocalStorage;
pub use memory::{MemoryKeystore, MemoryLocalStorage};
pub use os_keyring::KeyringBackend;
pub use platform::{BackendKind, Platform};
