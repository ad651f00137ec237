//! File-backed key/value store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::KvStore;
use crate::error::{Error, Result};

/// Directory name under the platform data dir.
const APP_DIR: &str = "brosmail";

/// File name for the persisted state blob.
const STATE_FILE: &str = "state.json";

/// Store persisted as a single JSON object on disk.
///
/// The file is loaded eagerly on open and rewritten on every mutation.
/// Flush failures are logged and otherwise swallowed: persistence here is
/// best-effort, the same contract browser local storage gives.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at the default platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is available, the directory
    /// cannot be created, or an existing state file cannot be read.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| Error::Config("no platform data directory".to_string()))?;
        Self::open(base.join(APP_DIR).join(STATE_FILE))
    }

    /// Opens a store at an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entries = Self::load(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the on-disk path of the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // A corrupt state file should not brick the client.
                warn!("state file unreadable, starting empty: {e}");
                Ok(HashMap::new())
            }
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(s) => s,
            Err(e) => {
                warn!("state serialization failed: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            warn!("state flush failed: {e}");
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.flush(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(key).is_some() {
                self.flush(&entries);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("brosmail-core-tests")
            .join(format!("{name}-{}.json", std::process::id()))
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("reopen");
        {
            let store = FileStore::open(&path).unwrap();
            store.set("theme_mode", "dark");
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme_mode").as_deref(), Some("dark"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert!(store.get("anything").is_none());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn remove_persists() {
        let path = temp_path("remove");
        {
            let store = FileStore::open(&path).unwrap();
            store.set("k", "v");
            store.remove("k");
        }
        let store = FileStore::open(&path).unwrap();
        assert!(store.get("k").is_none());
        fs::remove_file(&path).ok();
    }
}
