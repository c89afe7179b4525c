//! Key-value persistence for transactions and categories.
//!
//! Each key holds one JSON document. Saves overwrite the previous document
//! wholesale (last write wins).

use crate::error::Result;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key of the transaction list document.
pub const TRANSACTIONS_KEY: &str = "pft.transactions";

/// Key of the category registry document.
pub const CATEGORIES_KEY: &str = "pft.categories";

/// Load/save of JSON documents by key.
pub trait KeyValueStore {
    /// Returns the document stored under `key`, or `None` if nothing was
    /// ever saved there.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the document stored under `key`.
    fn save(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Uses `dir` as the data directory. It is created on first save.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write a sibling file, then rename it over the target.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;

        debug!("Saved {}", path.display());
        Ok(())
    }
}

/// Keeps documents in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        self.documents.insert(key.to_string(), value.clone());
        Ok(())
    }
}
