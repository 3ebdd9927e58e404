//! Key-value persistence wrapper
//!
//! All collections live in one TOML document, one top-level key per
//! collection. The document is loaded once (`init` is idempotent) and every
//! mutation rewrites the whole file atomically.

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use toml::{Table, Value};

pub const CATEGORIES_KEY: &str = "categories";
pub const PROJECTS_KEY: &str = "projects";
pub const TASKS_KEY: &str = "tasks";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const NOTIFICATIONS_ENABLED_KEY: &str = "notifications_enabled";

pub struct Storage {
    file_path: Option<PathBuf>,
    document: Mutex<Option<Table>>,
}

impl Storage {
    /// File-backed store. Nothing is read until the first access.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: Some(file_path.as_ref().to_path_buf()),
            document: Mutex::new(None),
        }
    }

    /// Store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            document: Mutex::new(None),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Load the document if it has not been loaded yet.
    pub fn init(&self) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        self.loaded(&mut guard)?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let mut guard = self.lock()?;
        let table = self.loaded(&mut guard)?;
        match table.get(key) {
            None => Ok(None),
            Some(value) => value
                .clone()
                .try_into::<T>()
                .map(Some)
                .map_err(|source| StorageError::Convert {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = Value::try_from(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let mut guard = self.lock()?;
        let table = self.loaded(&mut guard)?;
        let previous = table.insert(key.to_string(), value);
        if let Err(e) = self.persist(table) {
            match previous {
                Some(old) => table.insert(key.to_string(), old),
                None => table.remove(key),
            };
            return Err(e);
        }
        tracing::trace!(key, "stored value");
        Ok(())
    }

    /// Remove a key. Returns false when the key was not present.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut guard = self.lock()?;
        let table = self.loaded(&mut guard)?;
        let Some(previous) = table.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(table) {
            table.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut guard = self.lock()?;
        let table = self.loaded(&mut guard)?;
        Ok(table.keys().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Table>>, StorageError> {
        self.document.lock().map_err(|_| StorageError::Poisoned)
    }

    fn loaded<'a>(&self, document: &'a mut Option<Table>) -> Result<&'a mut Table, StorageError> {
        if document.is_none() {
            let table = self.load()?;
            tracing::debug!(path = ?self.file_path, keys = table.len(), "store initialized");
            *document = Some(table);
        }
        Ok(document.get_or_insert_with(Table::new))
    }

    fn load(&self) -> Result<Table, StorageError> {
        let Some(path) = &self.file_path else {
            return Ok(Table::new());
        };
        if !path.exists() {
            return Ok(Table::new());
        }

        let content = fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Table::new());
        }
        toml::from_str(&content).map_err(StorageError::Parse)
    }

    fn persist(&self, table: &Table) -> Result<(), StorageError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let content = toml::to_string_pretty(table).map_err(StorageError::Render)?;
        atomic_write(path, content.as_bytes())?;
        Ok(())
    }
}

/// Write `content` to `path` through a temp file in the same directory.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_get_set_remove() {
        let storage = Storage::in_memory();

        assert_eq!(storage.get::<Vec<String>>("names").unwrap(), None);

        storage
            .set("names", &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(
            storage.get::<Vec<String>>("names").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );

        assert!(storage.remove("names").unwrap());
        assert!(!storage.remove("names").unwrap());
        assert_eq!(storage.get::<Vec<String>>("names").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.toml");

        let storage = Storage::new(&path);
        storage.set(NOTIFICATIONS_ENABLED_KEY, &false).unwrap();
        assert!(path.exists());

        let reopened = Storage::new(&path);
        assert_eq!(
            reopened.get::<bool>(NOTIFICATIONS_ENABLED_KEY).unwrap(),
            Some(false)
        );
        assert_eq!(reopened.keys().unwrap(), vec![NOTIFICATIONS_ENABLED_KEY]);
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.toml");
        fs::write(&path, "flag = true\n").unwrap();

        let storage = Storage::new(&path);
        storage.init().unwrap();

        // A second init must not reload the file
        fs::write(&path, "flag = false\n").unwrap();
        storage.init().unwrap();
        assert_eq!(storage.get::<bool>("flag").unwrap(), Some(true));
    }

    #[test]
    fn test_missing_and_empty_files_are_empty_stores() {
        let dir = TempDir::new().unwrap();

        let missing = Storage::new(dir.path().join("missing.toml"));
        assert!(missing.keys().unwrap().is_empty());

        let empty_path = dir.path().join("empty.toml");
        fs::write(&empty_path, "").unwrap();
        let empty = Storage::new(&empty_path);
        assert!(empty.keys().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let storage = Storage::new(&path);
        assert!(matches!(storage.init(), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_wrong_shape_is_a_convert_error() {
        let storage = Storage::in_memory();
        storage.set("count", &3_i64).unwrap();

        let err = storage.get::<Vec<String>>("count").unwrap_err();
        assert!(matches!(err, StorageError::Convert { ref key, .. } if key == "count"));
    }
}
