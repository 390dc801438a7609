//! Store error types.
//!
//! Only failures a caller must react to are represented here. Read,
//! delete and decode failures never leave the facade: they are logged
//! and reported as absence instead.

use std::path::PathBuf;

/// Boxed backend error carried as a `#[source]`.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the secure store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backend rejected or failed a write.
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: BackendError,
    },

    /// A value handed to `set_json` could not be serialized.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The local store database could not be opened.
    #[error("failed to open local store at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: BackendError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Create a write error from a backend failure.
    pub fn write(key: impl Into<String>, source: impl Into<BackendError>) -> Self {
        Self::Write {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Create an open error from a backend failure.
    pub fn open(path: impl Into<PathBuf>, source: impl Into<BackendError>) -> Self {
        Self::Open {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Key the failed operation targeted, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Write { key, .. } | Self::Encode { key, .. } => Some(key),
            Self::Open { .. } | Self::Config(_) => None,
        }
    }

    /// Convert to anyhow::Error at application seams.
    pub fn into_anyhow(self) -> anyhow::Error {
        anyhow::Error::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_keeps_key_and_source() {
        let err = StoreError::write("token", anyhow::anyhow!("keystore locked"));
        assert_eq!(err.key(), Some("token"));
        assert_eq!(
            err.to_string(),
            "failed to write key 'token': keystore locked"
        );
        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "keystore locked");
    }

    #[test]
    fn test_config_error_has_no_key() {
        let err = StoreError::Config("bad platform".to_string());
        assert!(err.key().is_none());
        assert_eq!(err.to_string(), "configuration error: bad platform");
    }
}
