// SPDX-License-Identifier: GPL-3.0-only

//! Resolution of a key plus active modifiers into what the key shows and does.
//!
//! For character keys the effective glyph depends on Shift and CapsLock
//! (first match wins):
//!
//! 1. Shift and CapsLock: the shifted glyph if the key has one, else the
//!    plain glyph *as is*. The two modifiers do not cancel out into lowercase
//!    and the plain glyph is not uppercased either.
//! 2. Shift only: the shifted glyph if the key has one, else the uppercased
//!    plain glyph.
//! 3. CapsLock only: the uppercased plain glyph. Shifted glyphs are ignored.
//! 4. Neither: the plain glyph.
//!
//! Control keys ignore modifiers entirely and always resolve to their own
//! action.

use crate::app_settings::{BACKSPACE, DELETE, ENTER, SPACE, TAB};
use crate::input::modifier::ModifierSnapshot;
use crate::layout::{KeyDefinition, Layout};

/// Editing action a key performs on the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Replace the selection with this text.
    Insert(String),
    /// Delete the selection, or the character before the caret.
    Backspace,
    /// Delete the selection, or the character after the caret.
    Delete,
    /// The key does not touch the buffer (modifiers, arrows).
    None,
}

/// Returns the glyph `key` shows under `layout` and `modifiers`.
///
/// This is both the label rendered on the key and, for character keys, the
/// text it types.
pub fn resolve_effective_value(
    key: &KeyDefinition,
    layout: Layout,
    modifiers: ModifierSnapshot,
) -> String {
    if key.is_control {
        return key.plain_label(layout).to_string();
    }

    let Some(glyphs) = key.glyphs_for(layout) else {
        return key.plain_label(layout).to_string();
    };

    match (modifiers.shift, modifiers.caps_lock) {
        (true, true) => glyphs.shifted.clone().unwrap_or_else(|| glyphs.plain.clone()),
        (true, false) => glyphs
            .shifted
            .clone()
            .unwrap_or_else(|| glyphs.plain.to_uppercase()),
        (false, true) => glyphs.plain.to_uppercase(),
        (false, false) => glyphs.plain.clone(),
    }
}

/// Resolves the editing action for a key press.
pub fn resolve_action(
    key: &KeyDefinition,
    layout: Layout,
    modifiers: ModifierSnapshot,
) -> EditAction {
    if !key.is_control {
        if key.glyphs_for(layout).is_none() {
            tracing::debug!("Key '{}' has no glyph for {}", key.id, layout);
            return EditAction::None;
        }
        return EditAction::Insert(resolve_effective_value(key, layout, modifiers));
    }

    control_action(&key.id)
}

/// Maps a control key id to its action.
fn control_action(id: &str) -> EditAction {
    match id {
        TAB => EditAction::Insert("\t".to_string()),
        ENTER => EditAction::Insert("\n".to_string()),
        SPACE => EditAction::Insert(" ".to_string()),
        BACKSPACE => EditAction::Backspace,
        DELETE => EditAction::Delete,
        _ => EditAction::None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Glyphs;

    const NONE: ModifierSnapshot = ModifierSnapshot {
        shift: false,
        caps_lock: false,
        ctrl: false,
    };
    const SHIFT: ModifierSnapshot = ModifierSnapshot {
        shift: true,
        caps_lock: false,
        ctrl: false,
    };
    const CAPS: ModifierSnapshot = ModifierSnapshot {
        shift: false,
        caps_lock: true,
        ctrl: false,
    };
    const SHIFT_CAPS: ModifierSnapshot = ModifierSnapshot {
        shift: true,
        caps_lock: true,
        ctrl: false,
    };

    fn digit_one() -> KeyDefinition {
        KeyDefinition::character("Digit1", Glyphs::with_shifted("1", "!"))
    }

    fn letter_a() -> KeyDefinition {
        KeyDefinition::character("KeyA", Glyphs::plain("a"))
            .with_glyphs(Layout::Cyrillic, Glyphs::plain("ф"))
    }

    #[test]
    fn test_plain_glyph_without_modifiers() {
        assert_eq!(resolve_effective_value(&letter_a(), Layout::Latin, NONE), "a");
        assert_eq!(resolve_effective_value(&letter_a(), Layout::Cyrillic, NONE), "ф");
    }

    #[test]
    fn test_shift_prefers_shifted_glyph() {
        assert_eq!(resolve_effective_value(&digit_one(), Layout::Latin, SHIFT), "!");
        assert_eq!(resolve_effective_value(&letter_a(), Layout::Cyrillic, SHIFT), "Ф");
    }

    #[test]
    fn test_caps_lock_uppercases_plain_glyph() {
        assert_eq!(resolve_effective_value(&letter_a(), Layout::Latin, CAPS), "A");
        assert_eq!(resolve_effective_value(&digit_one(), Layout::Latin, CAPS), "1");
    }

    /// Shift and CapsLock together keep the plain glyph for letters
    #[test]
    fn test_shift_and_caps_lock() {
        assert_eq!(resolve_effective_value(&digit_one(), Layout::Latin, SHIFT_CAPS), "!");
        assert_eq!(resolve_effective_value(&letter_a(), Layout::Latin, SHIFT_CAPS), "a");
    }

    #[test]
    fn test_control_keys_ignore_modifiers() {
        let enter = KeyDefinition::control("Enter", "Enter");

        for modifiers in [NONE, SHIFT, CAPS, SHIFT_CAPS] {
            assert_eq!(resolve_effective_value(&enter, Layout::Latin, modifiers), "Enter");
            assert_eq!(
                resolve_action(&enter, Layout::Latin, modifiers),
                EditAction::Insert("\n".to_string())
            );
        }
    }

    #[test]
    fn test_control_actions() {
        let action = |id: &str| {
            resolve_action(&KeyDefinition::control(id, id), Layout::Latin, NONE)
        };

        assert_eq!(action("Tab"), EditAction::Insert("\t".to_string()));
        assert_eq!(action("Space"), EditAction::Insert(" ".to_string()));
        assert_eq!(action("Backspace"), EditAction::Backspace);
        assert_eq!(action("Delete"), EditAction::Delete);
        assert_eq!(action("ShiftLeft"), EditAction::None);
        assert_eq!(action("ArrowUp"), EditAction::None);
    }

    #[test]
    fn test_character_key_without_layout_glyph() {
        let mut key = letter_a();
        key.glyphs.remove(&Layout::Cyrillic);

        assert_eq!(resolve_action(&key, Layout::Cyrillic, NONE), EditAction::None);
        assert_eq!(resolve_effective_value(&key, Layout::Cyrillic, NONE), "KeyA");
    }

    #[test]
    fn test_unlabelled_control_key_shows_id() {
        let mut meta = KeyDefinition::control("MetaLeft", "Meta");
        meta.glyphs.clear();

        for modifiers in [NONE, SHIFT_CAPS] {
            assert_eq!(resolve_effective_value(&meta, Layout::Latin, modifiers), "MetaLeft");
        }
        assert_eq!(resolve_action(&meta, Layout::Latin, NONE), EditAction::None);
    }
}
