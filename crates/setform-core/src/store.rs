//! Backing store traits and backends.
//!
//! The store contract is deliberately small: read all values, replace all
//! values. There is no partial update; a save writes the full set extracted
//! from the dialog form, dropping any stored key the form no longer carries.
//!
//! Two backends ship with the crate: [`MemoryProvider`] for tests and
//! ephemeral hosts, and [`JsonFileProvider`] persisting one JSON object per
//! settings id with atomic writes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use setform_schema::SettingsMap;

use crate::errors::StoreError;

/// An opened settings store bound to one settings id.
pub trait SettingsStore: Send + std::fmt::Debug {
    /// Read every stored value.
    fn get_all(&self) -> Result<SettingsMap, StoreError>;

    /// Replace the full stored value set.
    fn set_all(&mut self, values: &SettingsMap) -> Result<(), StoreError>;
}

/// Opens stores with create-with-defaults semantics.
pub trait StoreProvider {
    /// Open the store for `key`, seeding it with `seed` only when no stored
    /// values exist yet. An existing store is returned untouched.
    fn open(&self, key: &str, seed: &SettingsMap) -> Result<Box<dyn SettingsStore>, StoreError>;
}

fn lock_poisoned(key: &str) -> StoreError {
    StoreError::ReadFailed {
        key: key.to_string(),
        source: std::io::Error::other("memory store lock poisoned"),
    }
}

/// Shared in-memory store provider.
///
/// All stores opened from one provider share a backing map keyed by settings
/// id, so reopening a key observes earlier writes and seeding applies only
/// on first open.
#[derive(Clone, Default)]
pub struct MemoryProvider {
    namespaces: Arc<Mutex<BTreeMap<String, SettingsMap>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreProvider for MemoryProvider {
    fn open(&self, key: &str, seed: &SettingsMap) -> Result<Box<dyn SettingsStore>, StoreError> {
        let mut namespaces = self.namespaces.lock().map_err(|_| lock_poisoned(key))?;
        if !namespaces.contains_key(key) {
            namespaces.insert(key.to_string(), seed.clone());
            debug!(event = "setform.store.memory_seeded", key = %key, values = seed.len());
        }
        Ok(Box::new(MemoryStore {
            key: key.to_string(),
            namespaces: Arc::clone(&self.namespaces),
        }))
    }
}

#[derive(Debug)]
struct MemoryStore {
    key: String,
    namespaces: Arc<Mutex<BTreeMap<String, SettingsMap>>>,
}

impl SettingsStore for MemoryStore {
    fn get_all(&self) -> Result<SettingsMap, StoreError> {
        let namespaces = self.namespaces.lock().map_err(|_| lock_poisoned(&self.key))?;
        Ok(namespaces.get(&self.key).cloned().unwrap_or_default())
    }

    fn set_all(&mut self, values: &SettingsMap) -> Result<(), StoreError> {
        let mut namespaces = self.namespaces.lock().map_err(|_| lock_poisoned(&self.key))?;
        namespaces.insert(self.key.clone(), values.clone());
        Ok(())
    }
}

/// File-backed store provider: one `<key>.json` object per settings id under
/// a base directory.
pub struct JsonFileProvider {
    base_dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn store_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.replace('/', "_")))
    }
}

impl StoreProvider for JsonFileProvider {
    fn open(&self, key: &str, seed: &SettingsMap) -> Result<Box<dyn SettingsStore>, StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| StoreError::OpenFailed {
            key: key.to_string(),
            source,
        })?;

        let path = self.store_path(key);
        if !path.exists() {
            write_values(&path, key, seed)?;
            debug!(
                event = "setform.store.file_seeded",
                key = %key,
                path = %path.display(),
                values = seed.len()
            );
        }

        Ok(Box::new(JsonFileStore {
            key: key.to_string(),
            path,
        }))
    }
}

#[derive(Debug)]
struct JsonFileStore {
    key: String,
    path: PathBuf,
}

impl SettingsStore for JsonFileStore {
    fn get_all(&self) -> Result<SettingsMap, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::ReadFailed {
            key: self.key.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Serialize {
            key: self.key.clone(),
            source,
        })
    }

    fn set_all(&mut self, values: &SettingsMap) -> Result<(), StoreError> {
        write_values(&self.path, &self.key, values)
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "setform.store.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

/// Write the value set as pretty JSON via temp file + rename, so a failed
/// write never leaves a truncated store behind.
fn write_values(path: &Path, key: &str, values: &SettingsMap) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(StoreError::WriteFailed {
            key: key.to_string(),
            source: e,
        });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(StoreError::WriteFailed {
            key: key.to_string(),
            source: e,
        });
    }

    Ok(())
}
