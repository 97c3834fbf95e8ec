// SPDX-License-Identifier: GPL-3.0-only

//! Renderer-facing view of the engine state.
//!
//! [`project`] is a pure function from engine state to a [`DisplayState`];
//! the renderer redraws from the projection and never inspects engine
//! internals. Labels are recomputed for every key on every projection because
//! Shift, CapsLock and layout switches change what each key shows.

use crate::app_settings;
use crate::input::keycode::resolve_effective_value;
use crate::input::{ModifierSnapshot, TextBuffer};
use crate::layout::{KeyRegistry, Layout};
use serde::Serialize;
use std::collections::HashSet;

/// What the renderer shows for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyState {
    pub id: String,
    /// Glyph to draw on the key
    pub label: String,
    /// Whether the key is drawn held down (also true for a latched CapsLock)
    pub is_pressed: bool,
}

/// Everything the renderer needs to draw the keyboard and text area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub buffer: TextBuffer,
    pub layout: Layout,
    /// Keys in table order
    pub key_states: Vec<KeyState>,
    /// Help text explaining the layout switch chord
    pub hint: &'static str,
}

impl DisplayState {
    /// Looks up the state of one key.
    pub fn key(&self, id: &str) -> Option<&KeyState> {
        self.key_states.iter().find(|k| k.id == id)
    }

    /// Label of one key, if it exists.
    pub fn label(&self, id: &str) -> Option<&str> {
        self.key(id).map(|k| k.label.as_str())
    }

    /// Returns `true` if the key exists and is drawn pressed.
    pub fn is_pressed(&self, id: &str) -> bool {
        self.key(id).is_some_and(|k| k.is_pressed)
    }
}

/// Projects engine state into a [`DisplayState`].
pub fn project(
    registry: &KeyRegistry,
    pressed: &HashSet<String>,
    layout: Layout,
    modifiers: ModifierSnapshot,
    buffer: &TextBuffer,
) -> DisplayState {
    let key_states = registry
        .all_keys()
        .iter()
        .map(|key| KeyState {
            id: key.id.clone(),
            label: resolve_effective_value(key, layout, modifiers),
            is_pressed: pressed.contains(&key.id),
        })
        .collect();

    DisplayState {
        buffer: buffer.clone(),
        layout,
        key_states,
        hint: app_settings::LAYOUT_SWITCH_HINT,
    }
}
