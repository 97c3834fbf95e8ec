// SPDX-License-Identifier: GPL-3.0-only

//! Key table parsing from JSON files and strings.

use crate::layout::registry::KeyRegistry;
use crate::layout::types::{KeyTable, ParseError, ParseResult};
use crate::layout::validation::validate_key_table;
use std::fs;

/// Parses a key table from a JSON file.
///
/// I/O errors (file not found, permission denied) are reported separately
/// from JSON errors, and validation errors carry the file path.
///
/// # Example
///
/// ```rust,ignore
/// use duoboard::layout::parse_key_table_file;
///
/// let result = parse_key_table_file("resources/keys/standard.json")?;
/// for warning in &result.warnings {
///     eprintln!("{}", warning);
/// }
/// let registry = result.into_inner();
/// ```
pub fn parse_key_table_file(path: &str) -> Result<ParseResult<KeyRegistry>, ParseError> {
    let json_str = fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;

    let table: KeyTable =
        serde_json::from_str(&json_str).map_err(|e| ParseError::json_error_with_path(e, path))?;

    build_registry(table).map_err(|e| e.with_path(path))
}

/// Parses a key table from a JSON string.
pub fn parse_key_table_from_string(json: &str) -> Result<ParseResult<KeyRegistry>, ParseError> {
    let table: KeyTable = serde_json::from_str(json)?;

    build_registry(table)
}

fn build_registry(table: KeyTable) -> Result<ParseResult<KeyRegistry>, ParseError> {
    let validated = validate_key_table(table)?;
    let registry = KeyRegistry::from_table(validated.value);

    tracing::info!(
        "Loaded key table '{}' with {} keys ({} warnings)",
        registry.name(),
        registry.len(),
        validated.warnings.len()
    );

    Ok(ParseResult::with_warnings(registry, validated.warnings))
}
