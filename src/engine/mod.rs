// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard engine and its renderer-facing projection.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use duoboard::engine::KeyboardEngine;
//! use duoboard::layout::KeyRegistry;
//! use duoboard::preferences::MemoryPreferenceStore;
//!
//! let registry = Arc::new(KeyRegistry::builtin()?);
//! let mut engine = KeyboardEngine::new(registry, MemoryPreferenceStore::new());
//!
//! engine.press("ShiftLeft");
//! engine.press("KeyH");
//! engine.release("KeyH");
//! engine.release("ShiftLeft");
//!
//! assert_eq!(engine.display_state().buffer.text(), "H");
//! ```

pub mod display;
pub mod state;

pub use display::{project, DisplayState, KeyState};
pub use state::KeyboardEngine;
