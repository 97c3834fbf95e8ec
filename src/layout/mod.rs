// SPDX-License-Identifier: GPL-3.0-only

//! Key tables: the static mapping from key identifiers to per-layout glyphs.
//!
//! A key table is a JSON document listing every key on the keyboard in
//! display order. Each key carries its identifier, whether it is a control
//! key, and its glyphs for every supported [`Layout`]:
//!
//! ```json
//! {
//!     "name": "standard",
//!     "keys": [
//!         {
//!             "id": "Digit1",
//!             "glyphs": {
//!                 "latin": {"plain": "1", "shifted": "!"},
//!                 "cyrillic": {"plain": "1", "shifted": "!"}
//!             },
//!             "display_groups": ["key"]
//!         },
//!         {
//!             "id": "Backspace",
//!             "is_control": true,
//!             "glyphs": {
//!                 "latin": {"plain": "Backspace"},
//!                 "cyrillic": {"plain": "Backspace"}
//!             },
//!             "display_groups": ["key", "key_backspace"]
//!         }
//!     ]
//! }
//! ```
//!
//! Tables are validated on load. Non-fatal problems come back as warnings in
//! the [`ParseResult`]; duplicate ids or character keys without glyphs
//! produce a [`ParseError::ValidationError`].
//!
//! ```rust,ignore
//! use duoboard::layout::KeyRegistry;
//!
//! let registry = KeyRegistry::builtin()?;
//! let key = registry.resolve("KeyQ")?;
//! ```

pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use parser::{parse_key_table_file, parse_key_table_from_string};
pub use registry::KeyRegistry;
pub use types::{
    Glyphs, KeyDefinition, KeyTable, Layout, ParseError, ParseLayoutError, ParseResult,
    RegistryError, Severity, ValidationIssue,
};
