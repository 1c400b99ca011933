//! JSON file-based key-value store.
//!
//! All keys live in a single human-readable JSON document. Writes use
//! write-to-temp + rename so the file is never left half written.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1), the document is loaded into memory once
//! - **Write**: O(n), the whole document is serialized on every `set`
//! - **Best for**: a handful of small keys written on user interaction

use crate::domain::error::{FinderError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk document format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the document format for future migrations.
    version: u32,

    /// Unix timestamp of the last successful write.
    #[serde(default)]
    updated_at: Option<i64>,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: None,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1718000000,
///   "entries": {
///     "favoriteCharacterIds": "[1,2]"
///   }
/// }
/// ```
///
/// Values are stored as opaque strings; the favorites payload is itself a
/// JSON-encoded array kept verbatim.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store. A file that exists but cannot be
    /// parsed also yields an empty store (logged), so a corrupt document never
    /// prevents startup; the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use character_finder::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/finder/store.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?.unwrap_or_default()
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store opened");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<Option<StoreData>> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<StoreData>(&contents) {
            Ok(data) => {
                tracing::debug!(version = data.version, entries = data.entries.len(), "loaded store data");
                Ok(Some(data))
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "store document is malformed, starting empty");
                Ok(None)
            }
        }
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FinderError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, len = value.len()).entered();

        let previous = self.data.entries.insert(key.to_string(), value.to_string());
        let previous_stamp = self.data.updated_at.replace(chrono::Utc::now().timestamp());

        if let Err(e) = self.save_to_file() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => self.data.entries.insert(key.to_string(), old),
                None => self.data.entries.remove(key),
            };
            self.data.updated_at = previous_stamp;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested/store.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("favoriteCharacterIds", "[1,2]").unwrap();
        store.set("favoriteCharacterIds", "[2]").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get("favoriteCharacterIds").unwrap().as_deref(), Some("[2]"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_document_opens_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["entries"]["k"], "v");
        assert_eq!(parsed["version"], 1);
        assert!(parsed["updated_at"].is_i64());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("k", "old").unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();
        assert!(store.set("k", "new").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("old"));
    }
}
