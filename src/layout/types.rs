// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for key tables.
//!
//! This module defines the static key definitions consumed by the engine,
//! the supported layouts, and the error and validation types produced while
//! loading a key table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents the table from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while loading a key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the offending field (e.g., "keys[3].glyphs.cyrillic")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns `true` if this issue prevents the table from loading.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for key table loading.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading the key table file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
    },

    /// The table parsed but failed validation
    ValidationError {
        /// Fatal issues found (warnings are not included here)
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },

    /// A bundled resource was not present in the binary
    MissingResource {
        /// Resource name that was requested
        name: String,
    },
}

impl ParseError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }

    /// Attaches a file path to errors that were raised without one.
    pub fn with_path(self, path: &str) -> Self {
        match self {
            ParseError::ValidationError {
                issues,
                file_path: None,
            } => ParseError::ValidationError {
                issues,
                file_path: Some(path.to_string()),
            },
            ParseError::JsonError {
                source,
                file_path: None,
                line_number,
            } => ParseError::JsonError {
                source,
                file_path: Some(path.to_string()),
                line_number,
            },
            other => other,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                write!(f, " with {} issue(s)", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "\n  {}. {}", i + 1, issue)?;
                }
                Ok(())
            }
            ParseError::MissingResource { name } => {
                write!(f, "Bundled key table '{}' is missing", name)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

/// Error returned by registry lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The key identifier has no entry in the table
    UnknownKey {
        /// Identifier that was looked up
        id: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownKey { id } => write!(f, "Unknown key '{}'", id),
        }
    }
}

impl std::error::Error for RegistryError {}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully loading a key table with optional warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully loaded value
    pub value: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the value, discarding warnings.
    pub fn into_inner(self) -> T {
        self.value
    }
}

// ============================================================================
// Key Table Data Structures
// ============================================================================

/// A character layout the keyboard can switch between.
///
/// Serialized as `"latin"` / `"cyrillic"`. The short names `"eng"` and
/// `"ru"` are accepted when reading older stored preferences.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    #[serde(alias = "eng")]
    Latin,
    #[serde(alias = "ru")]
    Cyrillic,
}

impl Layout {
    /// Every supported layout, in switching order.
    pub const ALL: [Layout; 2] = [Layout::Latin, Layout::Cyrillic];

    /// Returns the layout the Ctrl+Shift chord switches to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Layout::Latin => Layout::Cyrillic,
            Layout::Cyrillic => Layout::Latin,
        }
    }

    /// Name used for persistence and in key tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Latin => "latin",
            Layout::Cyrillic => "cyrillic",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLayoutError {
    pub parsing: String,
}

impl fmt::Display for ParseLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a layout", self.parsing)
    }
}

impl std::error::Error for ParseLayoutError {}

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latin" | "eng" => Ok(Layout::Latin),
            "cyrillic" | "ru" => Ok(Layout::Cyrillic),
            _ => Err(ParseLayoutError {
                parsing: s.to_string(),
            }),
        }
    }
}

/// Glyphs a key shows and types for one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    /// Glyph with no modifiers applied
    pub plain: String,

    /// Dedicated glyph used under Shift (symbol keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifted: Option<String>,
}

impl Glyphs {
    /// Glyphs with no dedicated shifted variant.
    pub fn plain(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            shifted: None,
        }
    }

    /// Glyphs with a dedicated shifted variant.
    pub fn with_shifted(plain: impl Into<String>, shifted: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            shifted: Some(shifted.into()),
        }
    }
}

/// A key on the virtual keyboard.
///
/// Control keys (`is_control`) perform an editing action or act as a
/// modifier; every other key types its resolved glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDefinition {
    /// Key identifier (e.g. "KeyQ", "ShiftLeft")
    pub id: String,

    /// Whether this key performs an action instead of typing a glyph
    #[serde(default)]
    pub is_control: bool,

    /// Glyphs per layout
    #[serde(default)]
    pub glyphs: HashMap<Layout, Glyphs>,

    /// Style groups the renderer uses to size and colour the key
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub display_groups: BTreeSet<String>,
}

impl KeyDefinition {
    /// Creates a character key with the same glyphs in every layout.
    pub fn character(id: impl Into<String>, glyphs: Glyphs) -> Self {
        Self {
            id: id.into(),
            is_control: false,
            glyphs: Layout::ALL.iter().map(|l| (*l, glyphs.clone())).collect(),
            display_groups: BTreeSet::new(),
        }
    }

    /// Creates a control key labelled `label` in every layout.
    pub fn control(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            is_control: true,
            glyphs: Layout::ALL
                .iter()
                .map(|l| (*l, Glyphs::plain(label.clone())))
                .collect(),
            display_groups: BTreeSet::new(),
        }
    }

    /// Replaces the glyphs for one layout.
    pub fn with_glyphs(mut self, layout: Layout, glyphs: Glyphs) -> Self {
        self.glyphs.insert(layout, glyphs);
        self
    }

    /// Adds a display group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.display_groups.insert(group.into());
        self
    }

    /// Returns the glyphs for `layout`, if the table defines them.
    pub fn glyphs_for(&self, layout: Layout) -> Option<&Glyphs> {
        self.glyphs.get(&layout)
    }

    /// Plain glyph for `layout`, falling back to the key id.
    pub fn plain_label(&self, layout: Layout) -> &str {
        self.glyphs_for(layout)
            .map(|g| g.plain.as_str())
            .unwrap_or(&self.id)
    }
}

/// A complete key table as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTable {
    /// Table name
    #[serde(default)]
    pub name: String,

    /// Keys in display order
    pub keys: Vec<KeyDefinition>,
}
