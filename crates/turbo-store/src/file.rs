//! File-backed store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{KvStore, StoreError};

/// A Key-Value store persisted as one JSON object on disk.
///
/// The whole file is read when the store is opened and rewritten after every
/// `set` or `delete`, so a value written by one process is visible to the
/// next process that opens the same path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or unparsable file is
    /// also opened empty, with a warning, and is replaced by the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "unusable store file, starting empty");
                BTreeMap::new()
            }
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");

        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>, key: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::write(key, e))?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| StoreError::write(key, e))
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(StoreError::Read {
            key: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next, key)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut next = self.entries.borrow().clone();
        if next.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&next, key)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path);
        store.set("Shopping-cart", r#"[{"id":1,"quantity":2}]"#).unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("Shopping-cart").unwrap().as_deref(),
            Some(r#"[{"id":1,"quantity":2}]"#)
        );
    }

    #[test]
    fn test_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.delete("a").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_garbage_file_opens_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("Shopping-cart").unwrap(), None);

        store.set("Shopping-cart", "[]").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("Shopping-cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_unreadable_path_opens_empty() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("Shopping-cart").unwrap(), None);
    }
}
