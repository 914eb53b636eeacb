//! Session storage backends
//!
//! Key/value stores with the semantics of browser `localStorage`:
//! string keys, string values, values survive process restarts
//! (for the file backend).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{SessionError, SessionResult};

/// Persistent string key/value storage
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write several items as one unit: either all land or none do
    fn set_items(&self, items: &[(&str, &str)]) -> SessionResult<()>;

    fn remove_items(&self, keys: &[&str]) -> SessionResult<()>;

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.remove_items(&[key])
    }
}

/// In-process storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let items = self.items.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        let mut items = self.items.lock().map_err(|_| SessionError::Poisoned)?;
        for (key, value) in entries {
            items.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> SessionResult<()> {
        let mut items = self.items.lock().map_err(|_| SessionError::Poisoned)?;
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// On-disk layout of [`FileStorage`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    items: BTreeMap<String, String>,
}

/// JSON file storage.
///
/// Every mutation rewrites the whole document through a temporary file and
/// a rename, so a crash never leaves a half-written session behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// When the session file was last written, if it exists
    pub fn updated_at(&self) -> SessionResult<Option<DateTime<Utc>>> {
        Ok(self.read_document()?.updated_at)
    }

    fn read_document(&self) -> SessionResult<StoredDocument> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(StoredDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, mut document: StoredDocument) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        document.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&document)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> SessionResult<()> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        let mut document = self.read_document()?;
        f(&mut document.items);
        self.write_document(document)
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(self.read_document()?.items.get(key).cloned())
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        self.modify(|items| {
            for (key, value) in entries {
                items.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> SessionResult<()> {
        self.modify(|items| {
            for key in keys {
                items.remove(*key);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.remove_item("a").unwrap();
        assert!(storage.get_item("a").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::new(&path);
        storage.set_items(&[("authToken", "tok"), ("authId", "a1")]).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("authToken").unwrap().as_deref(), Some("tok"));
        assert_eq!(reopened.get_item("authId").unwrap().as_deref(), Some("a1"));
        assert!(reopened.updated_at().unwrap().is_some());
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("none.json"));
        assert!(storage.get_item("authToken").unwrap().is_none());
        assert!(storage.updated_at().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_remove_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.set_items(&[("authToken", "tok"), ("authId", "a1")]).unwrap();

        storage.remove_item("authToken").unwrap();

        assert!(storage.get_item("authToken").unwrap().is_none());
        assert_eq!(storage.get_item("authId").unwrap().as_deref(), Some("a1"));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("authToken"),
            Err(SessionError::Serialization(_))
        ));
    }
}
