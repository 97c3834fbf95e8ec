// SPDX-License-Identifier: GPL-3.0-only

//! Duoboard - a two-layout virtual keyboard engine
//!
//! This crate holds the logic behind an on-screen keyboard that types into a
//! text buffer. It tracks which keys are held, resolves each key and the
//! active modifiers into a glyph or editing action, and applies edits with
//! correct caret placement. Drawing the keyboard is left to the caller, which
//! redraws from the [`engine::DisplayState`] the engine publishes.
//!
//! # Architecture
//!
//! 1. **Key registry** (`layout`): the static key table, loaded from JSON and
//!    shared read-only between engines.
//! 2. **Keyboard engine** (`engine`): owns the pressed keys, CapsLock phase,
//!    active layout and text buffer, and exposes press/release operations.
//!
//! The active layout (Latin or Cyrillic) is switched with left Ctrl + left
//! Shift and remembered through a [`preferences::PreferenceStore`].
//!
//! # Modules
//!
//! - `app_settings`: well-known key ids and other constants
//! - `config`: engine configuration
//! - `engine`: the keyboard engine and display projection
//! - `input`: modifier state, glyph resolution and the text buffer
//! - `layout`: key tables and the key registry
//! - `preferences`: layout persistence

pub mod app_settings;
pub mod config;
pub mod engine;
pub mod input;
pub mod layout;
pub mod preferences;

pub use crate::config::EngineConfig;
pub use crate::engine::{DisplayState, KeyState, KeyboardEngine};
pub use crate::layout::{KeyRegistry, Layout};
pub use crate::preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use crate::engine::KeyboardEngine;
    use crate::layout::{KeyRegistry, Layout};
    use crate::preferences::{JsonFilePreferenceStore, MemoryPreferenceStore};
    use futures::StreamExt;
    use std::sync::Arc;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Integration Test 1: Subscribers see every state change in order
    #[tokio::test]
    async fn test_subscriber_receives_updates() {
        init_tracing();
        let registry = Arc::new(KeyRegistry::builtin().unwrap());
        let mut engine = KeyboardEngine::new(registry, MemoryPreferenceStore::new());
        let mut rx = engine.subscribe();

        engine.press("KeyH");
        engine.release("KeyH");

        let initial = rx.next().await.unwrap();
        assert_eq!(initial.buffer.text(), "");

        let pressed = rx.next().await.unwrap();
        assert_eq!(pressed.buffer.text(), "h");
        assert!(pressed.is_pressed("KeyH"));

        let released = rx.next().await.unwrap();
        assert!(!released.is_pressed("KeyH"));
    }

    /// Integration Test 2: Dropped subscribers are pruned
    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned() {
        let registry = Arc::new(KeyRegistry::builtin().unwrap());
        let mut engine = KeyboardEngine::new(registry, MemoryPreferenceStore::new());

        let rx = engine.subscribe();
        let mut kept = engine.subscribe();
        assert_eq!(engine.subscriber_count(), 2);

        drop(rx);
        engine.press("KeyA");
        assert_eq!(engine.subscriber_count(), 1);

        let _initial = kept.next().await.unwrap();
        assert_eq!(kept.next().await.unwrap().buffer.text(), "a");
    }

    /// Integration Test 3: The layout survives a restart through a file store
    #[test]
    fn test_layout_persists_across_sessions() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duoboard.json");
        let registry = Arc::new(KeyRegistry::builtin().unwrap());

        {
            let mut engine =
                KeyboardEngine::new(Arc::clone(&registry), JsonFilePreferenceStore::open(&path));
            engine.press("ControlLeft");
            engine.press("ShiftLeft");
            engine.release("ShiftLeft");
            engine.release("ControlLeft");
            assert_eq!(engine.layout(), Layout::Cyrillic);
        }

        let engine = KeyboardEngine::new(registry, JsonFilePreferenceStore::open(&path));
        assert_eq!(engine.layout(), Layout::Cyrillic);
        assert_eq!(engine.display_state().label("KeyF"), Some("а"));
    }

    /// Integration Test 4: Independent engines share one registry
    #[test]
    fn test_engines_share_registry() {
        let registry = Arc::new(KeyRegistry::builtin().unwrap());
        let mut first = KeyboardEngine::new(Arc::clone(&registry), MemoryPreferenceStore::new());
        let mut second = KeyboardEngine::new(Arc::clone(&registry), MemoryPreferenceStore::new());

        first.press("ShiftLeft");
        first.press("KeyA");
        second.press("KeyA");

        assert_eq!(first.text(), "A");
        assert_eq!(second.text(), "a");
        assert_eq!(Arc::strong_count(&registry), 3);
    }

    /// Integration Test 5: Typing a Cyrillic word with CapsLock and Shift
    #[test]
    fn test_cyrillic_typing_session() {
        let registry = Arc::new(KeyRegistry::builtin().unwrap());
        let mut engine =
            KeyboardEngine::new(registry, MemoryPreferenceStore::with_value("lang", "cyrillic"));

        let tap = |engine: &mut KeyboardEngine<MemoryPreferenceStore>, id: &str| {
            engine.press(id);
            engine.release(id);
        };

        tap(&mut engine, "CapsLock");
        tap(&mut engine, "KeyL");
        tap(&mut engine, "CapsLock");
        for id in ["KeyF", "KeyH", "KeyR", "Digit1"] {
            tap(&mut engine, id);
        }
        engine.press("ShiftLeft");
        tap(&mut engine, "Digit3");
        engine.release("ShiftLeft");

        assert_eq!(engine.text(), "Дарк1№");
        let display = engine.display_state();
        assert_eq!(display.layout, Layout::Cyrillic);
        assert_eq!(display.label("Digit3"), Some("3"));
    }
}
