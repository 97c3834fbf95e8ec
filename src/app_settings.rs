// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Preference key under which the active layout is persisted.
pub const LAYOUT_PREFERENCE_KEY: &str = "lang";

/// File name of the bundled key table inside `resources/keys/`.
pub const BUILTIN_KEY_TABLE: &str = "standard.json";

/// Hint shown next to the keyboard explaining how to switch layouts.
pub const LAYOUT_SWITCH_HINT: &str = "Left Ctrl + Shift switches the layout";

/// Left Shift key identifier.
pub const SHIFT_LEFT: &str = "ShiftLeft";

/// Right Shift key identifier.
pub const SHIFT_RIGHT: &str = "ShiftRight";

/// Left Control key identifier. Only the left Control counts as Ctrl.
pub const CONTROL_LEFT: &str = "ControlLeft";

/// Caps Lock key identifier.
pub const CAPS_LOCK: &str = "CapsLock";

pub const TAB: &str = "Tab";
pub const ENTER: &str = "Enter";
pub const SPACE: &str = "Space";
pub const BACKSPACE: &str = "Backspace";
pub const DELETE: &str = "Delete";
