// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard engine: pressed keys, modifiers, layout and text buffer.

use std::collections::HashSet;
use std::sync::Arc;

use futures::channel::mpsc;

use crate::app_settings::{CAPS_LOCK, CONTROL_LEFT, SHIFT_LEFT, SHIFT_RIGHT};
use crate::config::EngineConfig;
use crate::engine::display::{project, DisplayState};
use crate::input::keycode::resolve_action;
use crate::input::{CapsLockPhase, EditAction, ModifierSnapshot, ModifierState, TextBuffer};
use crate::layout::{KeyRegistry, Layout};
use crate::preferences::PreferenceStore;

/// Key-state and text-editing engine behind one on-screen keyboard.
///
/// Input arrives as [`press`](Self::press) / [`release`](Self::release) calls
/// carrying a key identifier. Each call runs to completion: it updates the
/// pressed set, modifiers, layout and buffer, then publishes a fresh
/// [`DisplayState`] to every subscriber.
///
/// Unknown identifiers are logged and ignored. No engine operation fails.
#[derive(Debug)]
pub struct KeyboardEngine<S: PreferenceStore> {
    /// Shared, read-only key table
    registry: Arc<KeyRegistry>,

    /// Where the active layout is persisted
    store: S,

    config: EngineConfig,

    /// Identifiers of keys currently considered down
    pressed: HashSet<String>,

    /// CapsLock phase
    modifiers: ModifierState,

    layout: Layout,

    buffer: TextBuffer,

    /// Receivers of display updates; closed ones are dropped on the next send
    subscribers: Vec<mpsc::UnboundedSender<DisplayState>>,
}

impl<S: PreferenceStore> KeyboardEngine<S> {
    /// Creates an engine with the default configuration.
    pub fn new(registry: Arc<KeyRegistry>, store: S) -> Self {
        Self::with_config(registry, store, EngineConfig::default())
    }

    /// Creates an engine, restoring the last layout from `store`.
    pub fn with_config(registry: Arc<KeyRegistry>, store: S, config: EngineConfig) -> Self {
        let layout = restore_layout(&store, &config);
        tracing::debug!("Keyboard engine starting with layout {}", layout);

        Self {
            registry,
            store,
            config,
            pressed: HashSet::new(),
            modifiers: ModifierState::new(),
            layout,
            buffer: TextBuffer::new(),
            subscribers: Vec::new(),
        }
    }

    // ========================================================================
    // Key Events
    // ========================================================================

    /// Handles a key press.
    ///
    /// Pressing a key that is already down only republishes the display
    /// state; it does not repeat the key's edit.
    pub fn press(&mut self, id: &str) {
        let registry = Arc::clone(&self.registry);
        let key = match registry.resolve(id) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Ignoring press: {}", e);
                return;
            }
        };

        if !self.pressed.insert(id.to_string()) {
            tracing::debug!("Key '{}' is already pressed", id);
            self.publish();
            return;
        }

        if id == CAPS_LOCK {
            let phase = self.modifiers.caps_lock_pressed();
            tracing::debug!("CapsLock pressed, now {:?}", phase);
        }

        let action = resolve_action(key, self.layout, self.modifier_snapshot());
        self.apply(action);
        self.publish();
    }

    /// Handles a key release.
    ///
    /// Releasing either chord key while both `ControlLeft` and `ShiftLeft`
    /// are down switches the layout. CapsLock stays down until every second
    /// release, and releasing either Shift releases both.
    pub fn release(&mut self, id: &str) {
        if !self.registry.contains(id) {
            tracing::warn!("Ignoring release of unknown key '{}'", id);
            return;
        }

        if self.is_layout_chord(id) {
            self.switch_layout();
        }

        match id {
            CAPS_LOCK => {
                let phase = self.modifiers.caps_lock_released();
                tracing::debug!("CapsLock released, now {:?}", phase);
                if !phase.is_active() {
                    self.pressed.remove(CAPS_LOCK);
                }
            }
            SHIFT_LEFT | SHIFT_RIGHT => {
                self.pressed.remove(SHIFT_LEFT);
                self.pressed.remove(SHIFT_RIGHT);
            }
            _ => {
                self.pressed.remove(id);
            }
        }

        self.publish();
    }

    /// Evaluated against the pressed set before the released key is removed.
    fn is_layout_chord(&self, released: &str) -> bool {
        (released == CONTROL_LEFT || released == SHIFT_LEFT)
            && self.pressed.contains(CONTROL_LEFT)
            && self.pressed.contains(SHIFT_LEFT)
    }

    /// Toggles the layout and persists it. A failed write keeps the new layout.
    fn switch_layout(&mut self) {
        self.layout = self.layout.toggled();
        tracing::info!("Switched layout to {}", self.layout);

        if let Err(e) = self
            .store
            .set(&self.config.preference_key, self.layout.as_str())
        {
            tracing::warn!("Failed to persist layout {}: {}", self.layout, e);
        }
    }

    fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::Insert(text) => self.buffer.replace_selection(&text),
            EditAction::Backspace => self.buffer.backspace(),
            EditAction::Delete => self.buffer.delete_forward(),
            EditAction::None => {}
        }
    }

    // ========================================================================
    // Buffer Access
    // ========================================================================

    /// Replaces the buffer content and puts the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.publish();
    }

    /// Moves the selection. Out-of-range positions are clamped.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.buffer.set_selection(start, end);
        self.publish();
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_pressed(&self, id: &str) -> bool {
        self.pressed.contains(id)
    }

    pub fn caps_lock(&self) -> CapsLockPhase {
        self.modifiers.caps_lock()
    }

    /// Modifiers derived from the current pressed set.
    pub fn modifier_snapshot(&self) -> ModifierSnapshot {
        self.modifiers.snapshot(&self.pressed)
    }

    pub fn registry(&self) -> &Arc<KeyRegistry> {
        &self.registry
    }

    pub fn preference_store(&self) -> &S {
        &self.store
    }

    /// Projects the current state for the renderer.
    pub fn display_state(&self) -> DisplayState {
        project(
            &self.registry,
            &self.pressed,
            self.layout,
            self.modifier_snapshot(),
            &self.buffer,
        )
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribes to display updates.
    ///
    /// The receiver gets the current state immediately, then one state after
    /// every event.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DisplayState> {
        let (tx, rx) = mpsc::unbounded();
        if tx.unbounded_send(self.display_state()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }

        let state = self.display_state();
        self.subscribers
            .retain(|tx| tx.unbounded_send(state.clone()).is_ok());
    }
}

fn restore_layout<S: PreferenceStore>(store: &S, config: &EngineConfig) -> Layout {
    match store.get(&config.preference_key) {
        Some(stored) => stored.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored layout: {}", e);
            config.default_layout
        }),
        None => config.default_layout,
    }
}

// ============================================================================
// Tests
// ============================================================================
