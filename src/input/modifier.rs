// SPDX-License-Identifier: GPL-3.0-only

//! Modifier state for the virtual keyboard.
//!
//! Two modifiers behave differently from ordinary keys:
//!
//! - **CapsLock** is sticky. The first tap latches it on and it only turns off
//!   after a second tap, so it changes state once per *pair* of releases. The
//!   phases are modelled explicitly by [`CapsLockPhase`].
//! - **Shift** has two physical keys that act as one logical modifier; the
//!   engine releases both when either is released.
//!
//! Ctrl and Shift are otherwise plain hold modifiers derived from the pressed
//! set. [`ModifierSnapshot`] captures all three at one instant for glyph
//! resolution.
//!
//! # Example
//!
//! ```rust,ignore
//! use duoboard::input::{CapsLockPhase, ModifierState};
//!
//! let mut state = ModifierState::new();
//! state.caps_lock_pressed();
//! state.caps_lock_released();
//! assert_eq!(state.caps_lock(), CapsLockPhase::Locked);
//! ```

use crate::app_settings::{CONTROL_LEFT, SHIFT_LEFT, SHIFT_RIGHT};
use std::collections::HashSet;

/// Phases of the sticky CapsLock key.
///
/// | phase    | key down | releases seen in current pair |
/// |----------|----------|-------------------------------|
/// | `Off`    | no       | 0                             |
/// | `Held`   | yes      | 0                             |
/// | `Locked` | yes      | 1                             |
/// | `Primed` | no       | 1                             |
///
/// `Primed` is reached only by a release with no preceding press; the next
/// release completes the pair and returns to `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapsLockPhase {
    #[default]
    Off,
    Held,
    Locked,
    Primed,
}

impl CapsLockPhase {
    /// Phase after a press of the CapsLock key.
    #[must_use]
    pub fn on_press(self) -> Self {
        match self {
            CapsLockPhase::Off => CapsLockPhase::Held,
            CapsLockPhase::Primed => CapsLockPhase::Locked,
            held @ (CapsLockPhase::Held | CapsLockPhase::Locked) => held,
        }
    }

    /// Phase after a release of the CapsLock key.
    #[must_use]
    pub fn on_release(self) -> Self {
        match self {
            CapsLockPhase::Off => CapsLockPhase::Primed,
            CapsLockPhase::Held => CapsLockPhase::Locked,
            CapsLockPhase::Locked | CapsLockPhase::Primed => CapsLockPhase::Off,
        }
    }

    /// Returns `true` while the key counts as pressed.
    pub fn is_active(self) -> bool {
        matches!(self, CapsLockPhase::Held | CapsLockPhase::Locked)
    }
}

/// Tracks the CapsLock phase alongside the set of held keys.
#[derive(Debug, Clone, Default)]
pub struct ModifierState {
    caps_lock: CapsLockPhase,
}

impl ModifierState {
    /// Creates a new `ModifierState` with CapsLock off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current CapsLock phase.
    pub fn caps_lock(&self) -> CapsLockPhase {
        self.caps_lock
    }

    /// Applies a CapsLock press and returns the new phase.
    pub fn caps_lock_pressed(&mut self) -> CapsLockPhase {
        self.caps_lock = self.caps_lock.on_press();
        self.caps_lock
    }

    /// Applies a CapsLock release and returns the new phase.
    ///
    /// The key leaves the pressed set only when the returned phase is
    /// inactive.
    pub fn caps_lock_released(&mut self) -> CapsLockPhase {
        self.caps_lock = self.caps_lock.on_release();
        self.caps_lock
    }

    /// Derives the modifier snapshot for the given pressed set.
    pub fn snapshot(&self, pressed: &HashSet<String>) -> ModifierSnapshot {
        ModifierSnapshot {
            shift: pressed.contains(SHIFT_LEFT) || pressed.contains(SHIFT_RIGHT),
            caps_lock: self.caps_lock.is_active(),
            ctrl: pressed.contains(CONTROL_LEFT),
        }
    }
}

/// Modifiers active at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSnapshot {
    pub shift: bool,
    pub caps_lock: bool,
    pub ctrl: bool,
}

// ============================================================================
// Unit Tests
// ============================================================================
