//! Secure key-value storage for the NTRL reader app.
//!
//! A single [`SecureStore`] handle fronts either the OS encrypted keystore
//! or a browser-style local store, chosen once from the host [`Platform`].
//! Callers persist small sensitive values (preferences, migration flags,
//! tokens) through `set`/`get`/`delete` and the JSON helpers.

#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod store;
pub mod utils;

pub use config::{Config, ValidationResult};
pub use error::{Result, StoreError};
pub use store::{
    Backend, BackendKind, KeyringBackend, KeystoreBackend, LocalStorage, MemoryKeystore,
    MemoryLocalStorage, Platform, RedbLocalStorage, SecureStore,
};
