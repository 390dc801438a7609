//! Path utilities for the secure store.
//!
//! - [`get_ntrl_dir`] - `~/.ntrl/` (base directory, overridable with `NTRL_HOME`)
//! - [`get_config_path`] - `~/.ntrl/store.toml`
//! - [`get_local_store_path`] - `~/.ntrl/local.redb`

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::{CONFIG_FILE_NAME, HOME_ENV_VAR, LOCAL_STORE_FILE_NAME};

/// Get the ntrl base directory.
///
/// Resolution order:
/// 1. `NTRL_HOME` environment variable (if set and non-empty)
/// 2. `~/.ntrl/` (default)
pub fn get_ntrl_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV_VAR)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".ntrl"))
}

/// Get the config path: `~/.ntrl/store.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_ntrl_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the local storage database path: `~/.ntrl/local.redb`
pub fn get_local_store_path() -> Result<PathBuf> {
    Ok(get_ntrl_dir()?.join(LOCAL_STORE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    // NTRL_HOME itself is not exercised here: mutating the process
    // environment needs `unsafe` under edition 2024.

    #[test]
    fn test_derived_paths_structure() {
        let base = get_ntrl_dir().unwrap();
        assert!(get_config_path().unwrap().starts_with(&base));
        assert!(get_local_store_path().unwrap().starts_with(&base));
    }

    #[test]
    fn test_default_base_is_under_home() {
        if std::env::var(HOME_ENV_VAR).is_err() {
            let home = dirs::home_dir().expect("home directory should exist");
            assert_eq!(get_ntrl_dir().unwrap(), home.join(".ntrl"));
        }
    }

    #[test]
    fn test_path_extensions() {
        let config = get_config_path().unwrap();
        assert_eq!(config.extension().and_then(|e| e.to_str()), Some("toml"));

        let local = get_local_store_path().unwrap();
        assert_eq!(local.extension().and_then(|e| e.to_str()), Some("redb"));
    }
}
