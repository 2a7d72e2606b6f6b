// SPDX-License-Identifier: MPL-2.0
//! Persisted key/value state that survives between sessions.
//!
//! The localizer keeps the active language under a single storage key.
//! [`FileStorage`] writes the whole key/value map to a CBOR file in the
//! application data directory on every change, so another process (or a
//! later session) sees the value immediately. [`MemoryStorage`] keeps
//! everything in memory and is used for transient overrides and tests.
//!
//! # Path Resolution
//!
//! 1. Use [`FileStorage::open_in`] with an explicit directory
//! 2. Set `CIVIC_LOCALE_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use crate::error::{Error, Result};
use crate::paths;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Storage file name within the app data directory.
const STORAGE_FILE: &str = "storage.cbor";

/// Key/value persistence used for the active language.
pub trait LanguageStorage {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Re-reads values written by other writers. A no-op for in-memory storage.
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl LanguageStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// CBOR-backed storage file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file in the default data directory.
    pub fn open() -> Result<Self> {
        let dir = paths::get_app_data_dir()
            .ok_or_else(|| Error::Storage("no data directory available".into()))?;
        Self::open_in(&dir)
    }

    /// Opens the storage file inside `dir`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty with a warning; it is overwritten on the next [`set`](LanguageStorage::set).
    pub fn open_in(dir: &Path) -> Result<Self> {
        let mut storage = Self {
            path: dir.join(STORAGE_FILE),
            values: BTreeMap::new(),
        };
        if let Err(err) = storage.reload() {
            tracing::warn!(path = %storage.path.display(), "discarding stored state: {err}");
        }
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let reader = BufReader::new(fs::File::open(path)?);
        Ok(ciborium::from_reader(reader)?)
    }

    fn write_values(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(&self.path)?);
        ciborium::into_writer(&self.values, writer)?;
        Ok(())
    }
}

impl LanguageStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.write_values()
    }

    fn reload(&mut self) -> Result<()> {
        self.values = Self::read_values(&self.path)?;
        Ok(())
    }
}
