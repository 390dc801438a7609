//! Configuration for the secure store.
//!
//! Loaded from `store.toml` in the data directory (see [`crate::paths`]).
//! The file is optional; every field has a default suitable for the
//! current platform.
//!
//! ```toml
//! [store]
//! platform = "web"
//! local_path = "/var/lib/ntrl/local.redb"
//! keyring_service = "ntrl"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::StoreError;
use crate::paths;
use crate::store::{BackendKind, Platform};

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Root of `store.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSection,
}

/// `[store]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Host platform; defaults to the compilation target.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Local storage file; defaults to `$NTRL_HOME/local.redb`.
    #[serde(default)]
    pub local_path: Option<PathBuf>,
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            platform: None,
            local_path: None,
            keyring_service: default_keyring_service(),
        }
    }
}

fn default_keyring_service() -> String {
    constants::DEFAULT_KEYRING_SERVICE.to_string()
}

impl Config {
    /// Load configuration from the default config path.
    ///
    /// A missing file yields [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = paths::get_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - A field has an invalid value (e.g. an unknown platform)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Effective platform: configured, or the compilation target.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.store.platform.unwrap_or_else(Platform::current)
    }

    /// Effective local storage path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if no path is configured and the data
    /// directory cannot be resolved.
    pub fn local_path(&self) -> std::result::Result<PathBuf, StoreError> {
        match &self.store.local_path {
            Some(path) => Ok(path.clone()),
            None => paths::get_local_store_path().map_err(|e| StoreError::Config(e.to_string())),
        }
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error listing every problem found:
    /// - Empty or whitespace-only `keyring_service`
    /// - Empty `local_path`
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.store.keyring_service.trim().is_empty() {
            errors.push("store.keyring_service cannot be empty".to_string());
        }

        if let Some(path) = &self.store.local_path {
            if path.as_os_str().is_empty() {
                errors.push("store.local_path cannot be empty".to_string());
            } else if path.is_relative() {
                warnings.push(format!(
                    "store.local_path '{}' is relative and resolves against the working directory",
                    path.display()
                ));
            }

            let platform = self.platform();
            if platform.backend_kind() == BackendKind::Keystore {
                warnings.push(format!(
                    "store.local_path is ignored on platform '{platform}' (uses the OS keystore)"
                ));
            }
        }

        if errors.is_empty() {
            Ok(ValidationResult { warnings })
        } else {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.store.platform.is_none());
        assert!(config.store.local_path.is_none());
        assert_eq!(config.store.keyring_service, "ntrl");
        assert_eq!(config.platform(), Platform::current());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [store]
            platform = "web"
            local_path = "/tmp/ntrl/local.redb"
            keyring_service = "ntrl-dev"
            "#,
        )
        .unwrap();

        assert_eq!(config.platform(), Platform::Web);
        assert_eq!(
            config.local_path().unwrap(),
            PathBuf::from("/tmp/ntrl/local.redb")
        );
        assert_eq!(config.store.keyring_service, "ntrl-dev");
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let result = Config::parse("[store]\nplatform = \"palmos\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.toml");
        fs::write(&path, "[store]\nplatform = \"ios\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.platform(), Platform::Ios);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load_from(tmp.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_default_is_clean() {
        let result = Config::default().validate().unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_validate_empty_service_is_error() {
        let mut config = Config::default();
        config.store.keyring_service = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("keyring_service cannot be empty"));
    }

    #[test]
    fn test_validate_local_path_on_keystore_platform_warns() {
        let mut config = Config::default();
        config.store.platform = Some(Platform::Android);
        config.store.local_path = Some(PathBuf::from("/data/local.redb"));

        let result = config.validate().unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("ignored on platform 'android'"));
    }

    #[test]
    fn test_validate_relative_local_path_warns() {
        let mut config = Config::default();
        config.store.platform = Some(Platform::Web);
        config.store.local_path = Some(PathBuf::from("local.redb"));

        let result = config.validate().unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("is relative"));
    }
}
