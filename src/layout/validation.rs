// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for key tables.
//!
//! Validation is permissive: problems that still leave a usable table are
//! collected as warnings, and only problems that would make key resolution
//! ambiguous or impossible are reported as errors.

use crate::layout::types::{KeyTable, Layout, ParseError, ParseResult, Severity, ValidationIssue};
use std::collections::HashSet;

/// Validates a key table and returns it with warnings.
///
/// Returns `ParseError::ValidationError` carrying the error-severity issues
/// if any were found.
pub fn validate_key_table(table: KeyTable) -> Result<ParseResult<KeyTable>, ParseError> {
    let mut issues = Vec::new();

    if table.keys.is_empty() {
        issues.push(
            ValidationIssue::new(Severity::Error, "Key table has no keys", "keys")
                .with_suggestion("Add at least one key definition"),
        );
    }

    validate_identifiers(&table, &mut issues);
    validate_glyphs(&table, &mut issues);
    validate_display_groups(&table, &mut issues);

    let (errors, warnings): (Vec<_>, Vec<_>) = issues.into_iter().partition(|i| i.is_error());

    if !errors.is_empty() {
        return Err(ParseError::validation_error(errors));
    }

    Ok(ParseResult::with_warnings(table, warnings))
}

/// Checks that every key has a non-empty, unique identifier.
pub fn validate_identifiers(table: &KeyTable, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();

    for (idx, key) in table.keys.iter().enumerate() {
        let path = format!("keys[{}].id", idx);

        if key.id.is_empty() {
            issues.push(
                ValidationIssue::new(Severity::Error, "Key id is empty", path)
                    .with_suggestion("Use the DOM key code, e.g. \"KeyQ\""),
            );
            continue;
        }

        if !seen.insert(key.id.as_str()) {
            issues.push(ValidationIssue::new(
                Severity::Error,
                format!("Duplicate key id '{}'", key.id),
                path,
            ));
        }
    }
}

/// Checks that every key has glyphs for every supported layout.
///
/// A character key without a plain glyph cannot type anything, so that is an
/// error. A control key without a glyph only loses its label.
pub fn validate_glyphs(table: &KeyTable, issues: &mut Vec<ValidationIssue>) {
    for (idx, key) in table.keys.iter().enumerate() {
        for layout in Layout::ALL {
            let path = format!("keys[{}].glyphs.{}", idx, layout);

            match key.glyphs_for(layout) {
                None if key.is_control => issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("Control key '{}' has no label", key.id),
                        path,
                    )
                    .with_suggestion("The key id will be shown instead"),
                ),
                None => issues.push(ValidationIssue::new(
                    Severity::Error,
                    format!("Key '{}' has no glyph", key.id),
                    path,
                )),
                Some(glyphs) if !key.is_control => {
                    if glyphs.plain.chars().count() != 1 {
                        issues.push(ValidationIssue::new(
                            Severity::Warning,
                            format!("Key '{}' types more than one character", key.id),
                            format!("{}.plain", path),
                        ));
                    }
                    if glyphs.shifted.as_ref().is_some_and(|s| s.chars().count() != 1) {
                        issues.push(ValidationIssue::new(
                            Severity::Warning,
                            format!("Shifted glyph of '{}' is not one character", key.id),
                            format!("{}.shifted", path),
                        ));
                    }
                }
                Some(_) => {}
            }
        }
    }
}

/// Warns about keys the renderer has no style group for.
pub fn validate_display_groups(table: &KeyTable, issues: &mut Vec<ValidationIssue>) {
    for (idx, key) in table.keys.iter().enumerate() {
        if key.display_groups.is_empty() {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                format!("Key '{}' has no display groups", key.id),
                format!("keys[{}].display_groups", idx),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Glyphs, KeyDefinition};

    fn table(keys: Vec<KeyDefinition>) -> KeyTable {
        KeyTable {
            name: "test".to_string(),
            keys,
        }
    }

    #[test]
    fn test_valid_table_has_no_warnings() {
        let result = validate_key_table(table(vec![
            KeyDefinition::character("KeyA", Glyphs::plain("a")).with_group("key"),
            KeyDefinition::control("Enter", "Enter").with_group("key"),
        ]))
        .unwrap();

        assert!(!result.has_warnings());
        assert_eq!(result.value.keys.len(), 2);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            validate_key_table(table(vec![])),
            Err(ParseError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = validate_key_table(table(vec![
            KeyDefinition::character("KeyA", Glyphs::plain("a")),
            KeyDefinition::character("KeyA", Glyphs::plain("b")),
        ]))
        .unwrap_err();

        match err {
            ParseError::ValidationError { issues, .. } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field_path, "keys[1].id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_character_key_missing_layout_is_error() {
        let mut key = KeyDefinition::character("KeyA", Glyphs::plain("a"));
        key.glyphs.remove(&Layout::Cyrillic);

        assert!(validate_key_table(table(vec![key])).is_err());
    }

    #[test]
    fn test_control_key_missing_label_is_warning() {
        let mut key = KeyDefinition::control("MetaLeft", "Win").with_group("key");
        key.glyphs.clear();

        let result = validate_key_table(table(vec![key])).unwrap();
        assert_eq!(result.warning_count(), 2);
        assert!(result.warnings.iter().all(|w| w.severity == Severity::Warning));
    }

    #[test]
    fn test_multi_character_glyph_is_warning() {
        let key = KeyDefinition::character("KeyA", Glyphs::plain("ab")).with_group("key");

        let result = validate_key_table(table(vec![key])).unwrap();
        assert_eq!(result.warning_count(), 2);
    }
}
