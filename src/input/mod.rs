// SPDX-License-Identifier: GPL-3.0-only

//! Input handling building blocks for the keyboard engine.
//!
//! - [`modifier`]: the CapsLock phase machine and modifier snapshots
//! - [`keycode`]: resolving a key and modifiers into a glyph or editing action
//! - [`buffer`]: the character-indexed text buffer edits are applied to

pub mod buffer;
pub mod keycode;
pub mod modifier;

pub use buffer::TextBuffer;
pub use keycode::{resolve_action, resolve_effective_value, EditAction};
pub use modifier::{CapsLockPhase, ModifierSnapshot, ModifierState};
