//! JSON-file storage standing in for browser local storage.
//!
//! DESIGN
//! ======
//! The whole file is one JSON object of string values. Every write reads the
//! current object, applies the change, writes a sibling temp file and renames
//! it over the original, so a crash mid-write leaves the previous contents.
//!
//! A file that is not a JSON object fails reads with `Corrupt`, but the next
//! write starts over from an empty object, like `localStorage.setItem`
//! overwriting a bad value.
//!
//! TRADE-OFFS
//! ==========
//! Read-modify-write is serialized only within this process. Two processes
//! sharing a file can lose each other's writes; the session store is the
//! sole writer of its key, so this is acceptable.

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use tracing::warn;

use super::{KeyValueStore, StorageError};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Storage backed by `path`. The file and its parent directories are
    /// created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StorageError::Corrupt(format!("expected object, found {}", kind_of(&other)))),
            Err(e) => Err(StorageError::Corrupt(e.to_string())),
        }
    }

    fn persist(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply a change and persist it. An unreadable file is replaced rather
    /// than blocking every later write.
    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>) -> bool) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut map, recovered) = match self.load() {
            Ok(map) => (map, false),
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding unreadable storage file");
                (Map::new(), true)
            }
            Err(e) => return Err(e),
        };
        if apply(&mut map) || recovered {
            self.persist(&map)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load()?;
        Ok(match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            // Foreign writers may have stored a non-string; hand back its JSON text.
            Some(other) => Some(other.to_string()),
            None => None,
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_owned(), Value::String(value.to_owned()));
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| map.remove(key).is_some())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
