//! Durable key-value persistence.
//!
//! Every value lives under its own key and is written independently; there is
//! no cross-key transaction. Reads never fail loudly: an absent, unreadable or
//! corrupt value is reported as "no data". Writes propagate their errors.

use crate::config::ensure_data_dir;
use crate::error::Result;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Synchronous get/set of raw JSON text under named keys.
pub trait DurableStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, raw: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<()> {
        ensure_data_dir(&self.dir)?;
        fs::write(self.key_path(key), raw)?;
        Ok(())
    }
}

/// In-process store, lost when the process ends.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl DurableStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<()> {
        self.entries.insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

/// Load and decode the value under `key`, treating anything unusable as absent.
pub fn load_json<T: DeserializeOwned>(store: &impl DurableStore, key: &str) -> Option<T> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Could not read '{}': {}", key, e);
            return None;
        }
    };

    // Empty files count as absent
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt value under '{}': {}", key, e);
            None
        }
    }
}

/// Encode `value` and overwrite whatever is stored under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl DurableStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)?;
    debug!("Persisted '{}' ({} bytes)", key, raw.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_loads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<Vec<String>>(&store, "missing"), None);
    }

    #[test]
    fn corrupt_value_loads_as_none() {
        let mut store = MemoryStore::new();
        store.save("recentEmojis", "[\"🙂\",").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "recentEmojis"), None);
    }

    #[test]
    fn wrong_shape_loads_as_none() {
        let mut store = MemoryStore::new();
        store.save("recentEmojis", "{\"a\":1}").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "recentEmojis"), None);
    }

    #[test]
    fn saved_value_is_json_text() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "favoriteEmojis", &vec!["🔥".to_string()]).unwrap();
        assert_eq!(store.raw("favoriteEmojis"), Some("[\"🔥\"]"));
        assert_eq!(
            load_json::<Vec<String>>(&store, "favoriteEmojis"),
            Some(vec!["🔥".to_string()])
        );
    }
}
