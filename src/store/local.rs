//! Redb-backed local storage.
//!
//! Persistent, unencrypted, single-file string store standing in for the
//! browser's origin-scoped `localStorage` on native targets. One database
//! file is one origin.

use super::backend::LocalStorage;
use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Table holding physical key/value pairs.
pub(crate) const LOCAL_TABLE: TableDefinition<'static, &'static str, &'static str> =
    TableDefinition::new("local_storage");

/// Redb-backed local storage.
///
/// `RedbLocalStorage` is `Clone` and can be shared across threads. Every
/// call runs its own transaction, so writes are durable once they return.
#[derive(Clone)]
pub struct RedbLocalStorage {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbLocalStorage {
    /// Opens or creates the storage file at `path`.
    ///
    /// Creates parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created (permissions, lock held, etc.)
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create local storage directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open local storage: {}", path.display()))?;

        // Create the table up front so reads on a fresh file find it
        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        {
            let _table = write_txn
                .open_table(LOCAL_TABLE)
                .context("Failed to initialize local storage table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalStorage for RedbLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(LOCAL_TABLE)
            .context("Failed to open local storage table")?;

        let value = table
            .get(key)
            .with_context(|| format!("Failed to read key '{key}'"))?
            .map(|guard| guard.value().to_string());

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(LOCAL_TABLE)
                .context("Failed to open local storage table")?;

            table
                .insert(key, value)
                .with_context(|| format!("Failed to insert key '{key}'"))?;
        }

        write_txn
            .commit()
            .context("Failed to commit set transaction")?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(LOCAL_TABLE)
                .context("Failed to open local storage table")?;

            table
                .remove(key)
                .with_context(|| format!("Failed to remove key '{key}'"))?;
        }

        write_txn
            .commit()
            .context("Failed to commit remove transaction")?;

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(LOCAL_TABLE)
            .context("Failed to open local storage table")?;

        let mut keys = Vec::new();
        for item in table.iter().context("Failed to iterate local storage")? {
            let (key, _) = item.context("Failed to read local storage entry")?;
            keys.push(key.value().to_string());
        }

        Ok(keys)
    }
}
