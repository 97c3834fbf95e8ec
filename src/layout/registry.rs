// SPDX-License-Identifier: GPL-3.0-only

//! Read-only lookup over a validated key table.

use crate::app_settings;
use crate::layout::parser::parse_key_table_from_string;
use crate::layout::types::{KeyDefinition, KeyTable, ParseError, RegistryError};
use rust_embed::RustEmbed;
use std::collections::HashMap;

/// Key tables bundled into the binary.
#[derive(RustEmbed)]
#[folder = "resources/keys/"]
struct BundledKeyTables;

/// Static mapping from key identifier to its definition.
///
/// The registry holds no mutable state and is `Send + Sync`, so any number of
/// engines can share one through an `Arc`.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    name: String,
    keys: Vec<KeyDefinition>,
    index: HashMap<String, usize>,
}

impl KeyRegistry {
    /// Builds a registry from an already validated table.
    ///
    /// Later duplicates of an id shadow earlier ones; the loaders reject
    /// duplicate ids before this point.
    pub fn from_table(table: KeyTable) -> Self {
        let index = table
            .keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.id.clone(), i))
            .collect();

        Self {
            name: table.name,
            keys: table.keys,
            index,
        }
    }

    /// Loads the bundled standard 64-key table.
    pub fn builtin() -> Result<Self, ParseError> {
        let name = app_settings::BUILTIN_KEY_TABLE;
        let file = BundledKeyTables::get(name).ok_or_else(|| ParseError::MissingResource {
            name: name.to_string(),
        })?;

        let json = String::from_utf8_lossy(&file.data);
        let result = parse_key_table_from_string(&json)?;

        for warning in &result.warnings {
            tracing::warn!("Bundled key table: {}", warning);
        }

        Ok(result.into_inner())
    }

    /// Looks up a key by identifier.
    pub fn resolve(&self, id: &str) -> Result<&KeyDefinition, RegistryError> {
        self.index
            .get(id)
            .map(|&i| &self.keys[i])
            .ok_or_else(|| RegistryError::UnknownKey { id: id.to_string() })
    }

    /// Every key in table order.
    pub fn all_keys(&self) -> &[KeyDefinition] {
        &self.keys
    }

    /// Returns `true` if `id` has an entry.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
