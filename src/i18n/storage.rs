//! Persistent key/value preferences.
//!
//! A small JSON object on disk holds values such as the chosen language.
//! Every operation fails soft: problems are logged and reported as
//! `None` / `false`, never as errors.

use crate::log;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("`{0}` is not a JSON object")]
    Json(PathBuf, #[source] serde_json::Error),
}

#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        match self.read() {
            Ok(map) => map.get(key).and_then(|value| match value {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            }),
            Err(err) => {
                log!("storage"; "get `{key}` failed: {err}");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> bool {
        let _guard = self.lock.lock();
        let result = self.read().and_then(|mut map| {
            map.insert(key.to_owned(), Value::String(value.to_owned()));
            self.write(&map)
        });
        self.report("set", key, result)
    }

    pub fn remove(&self, key: &str) -> bool {
        let _guard = self.lock.lock();
        let result = self.read().and_then(|mut map| {
            if map.remove(key).is_some() {
                self.write(&map)
            } else {
                Ok(())
            }
        });
        self.report("remove", key, result)
    }

    fn report(&self, op: &str, key: &str, result: Result<(), StorageError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                log!("storage"; "{op} `{key}` failed: {err}");
                false
            }
        }
    }

    /// Missing file reads as an empty store.
    fn read(&self) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StorageError::Io(self.path.clone(), err)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&text).map_err(|err| StorageError::Json(self.path.clone(), err))
    }

    fn write(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(parent.to_path_buf(), err))?;
        }
        let text = serde_json::to_string_pretty(map)
            .map_err(|err| StorageError::Json(self.path.clone(), err))?;
        fs::write(&self.path, text).map_err(|err| StorageError::Io(self.path.clone(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join(".bych4n/storage.json"));

        assert_eq!(store.get("bych4n-language"), None);
        assert!(store.set("bych4n-language", "en"));
        assert_eq!(store.get("bych4n-language").as_deref(), Some("en"));

        assert!(store.remove("bych4n-language"));
        assert_eq!(store.get("bych4n-language"), None);
    }

    #[test]
    fn test_values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        PreferenceStore::new(&path).set("theme", "dark");
        PreferenceStore::new(&path).set("bych4n-language", "tr");

        let store = PreferenceStore::new(&path);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.get("bych4n-language").as_deref(), Some("tr"));
    }

    #[test]
    fn test_corrupt_file_fails_soft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert_eq!(store.get("bych4n-language"), None);
        assert!(!store.set("bych4n-language", "en"));
    }

    #[test]
    fn test_unwritable_location_fails_soft() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let store = PreferenceStore::new(blocker.join("storage.json"));
        assert!(!store.set("bych4n-language", "en"));
    }

    #[test]
    fn test_remove_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("storage.json"));
        assert!(store.remove("nothing"));
    }
}
