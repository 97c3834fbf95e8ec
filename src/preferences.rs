// SPDX-License-Identifier: GPL-3.0-only

//! Key-value preference storage.
//!
//! The engine only needs to remember the active layout between sessions, so
//! a preference store is a flat string map. Persistence is best effort: the
//! engine logs and ignores write failures.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error raised when a preference cannot be written.
#[derive(Debug)]
pub enum PreferenceError {
    /// The backing file could not be written
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    /// The preferences could not be serialized
    Json { source: serde_json::Error },
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::Io { source, path } => {
                write!(f, "Failed to write preferences to '{}': {}", path.display(), source)
            }
            PreferenceError::Json { source } => {
                write!(f, "Failed to serialize preferences: {}", source)
            }
        }
    }
}

impl std::error::Error for PreferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreferenceError::Io { source, .. } => Some(source),
            PreferenceError::Json { source } => Some(source),
        }
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(source: serde_json::Error) -> Self {
        PreferenceError::Json { source }
    }
}

/// A get/set string preference service.
pub trait PreferenceStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory store. Values are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a flat JSON object in a single file.
///
/// The file is read once on open and rewritten on every `set`. A missing
/// file starts empty; an unreadable or corrupt one is logged and also starts
/// empty, to be replaced on the next write.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFilePreferenceStore {
    /// Opens the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        Self { path, values }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No preferences at '{}', starting empty", path.display());
                return BTreeMap::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read preferences '{}': {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt preferences '{}': {}", path.display(), e);
            BTreeMap::new()
        })
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let io_error = |source| PreferenceError::Io {
            source,
            path: self.path.clone(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(io_error)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
