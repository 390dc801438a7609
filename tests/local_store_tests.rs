//! End-to-end tests for the web (local storage) configuration.
//!
//! Drives the public API from a `store.toml` on disk through to the redb
//! file, then inspects the file directly.

use ntrl_secure_store::constants::LOCAL_KEY_PREFIX;
use ntrl_secure_store::{
    BackendKind, Config, LocalStorage, Platform, RedbLocalStorage, SecureStore,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct MigrationState {
    version: u32,
    completed: Vec<String>,
}

fn write_web_config(dir: &Path) -> std::path::PathBuf {
    let db_path = dir.join("data").join("local.redb");
    let config_path = dir.join("store.toml");
    fs::write(
        &config_path,
        format!(
            "[store]\nplatform = \"web\"\nlocal_path = {:?}\n",
            db_path.display().to_string()
        ),
    )
    .unwrap();
    config_path
}

#[tokio::test]
async fn test_config_file_to_prefixed_redb_entries() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(write_web_config(tmp.path())).unwrap();
    assert_eq!(config.platform(), Platform::Web);
    assert!(!config.validate().unwrap().has_warnings());

    let db_path = config.local_path().unwrap();
    {
        let store = SecureStore::from_config(&config).unwrap();
        assert_eq!(store.backend_kind(), BackendKind::Local);

        store.set("session", "s-1").await.unwrap();
        store
            .set_json(
                "migration",
                &MigrationState {
                    version: 2,
                    completed: vec!["prefs-v2".to_string()],
                },
            )
            .await
            .unwrap();
        store.set("scratch", "tmp").await.unwrap();
        store.delete("scratch").await;
    }

    // Store dropped: the file lock is released and the raw file can be read
    let raw = RedbLocalStorage::open(&db_path).unwrap();
    let keys = raw.keys().unwrap();
    assert_eq!(keys, vec!["ntrl_secure_migration", "ntrl_secure_session"]);
    assert!(keys.iter().all(|k| k.starts_with(LOCAL_KEY_PREFIX)));
    assert_eq!(
        raw.get_item("ntrl_secure_migration").unwrap().as_deref(),
        Some(r#"{"version":2,"completed":["prefs-v2"]}"#)
    );
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(write_web_config(tmp.path())).unwrap();

    {
        let store = SecureStore::from_config(&config).unwrap();
        store.set("token", "persisted").await.unwrap();
    }

    let store = SecureStore::from_config(&config).unwrap();
    assert_eq!(store.get("token").await.as_deref(), Some("persisted"));
    assert!(store.get("never-set").await.is_none());
}

#[tokio::test]
async fn test_corrupted_json_entry_reads_as_absent() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(write_web_config(tmp.path())).unwrap();
    let db_path = config.local_path().unwrap();

    {
        // Something outside the facade scribbles over the entry
        let raw = RedbLocalStorage::open(&db_path).unwrap();
        raw.set_item("ntrl_secure_migration", "{truncated").unwrap();
    }

    let store = SecureStore::from_config(&config).unwrap();
    let state: Option<MigrationState> = store.get_json("migration").await;
    assert!(state.is_none());
    assert_eq!(store.get("migration").await.as_deref(), Some("{truncated"));
}
