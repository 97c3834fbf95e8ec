// SPDX-License-Identifier: GPL-3.0-only

//! The editable text buffer the keyboard types into.
//!
//! Positions are character offsets, not byte offsets, so Cyrillic text edits
//! the same way Latin text does. Every operation keeps
//! `selection_start <= selection_end <= len()`; out-of-range positions are
//! clamped to the nearest valid boundary instead of being rejected.

use serde::Serialize;

/// Text content plus a selection (a caret when the selection is empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextBuffer {
    #[serde(serialize_with = "serialize_chars")]
    content: Vec<char>,
    selection_start: usize,
    selection_end: usize,
}

fn serialize_chars<S: serde::Serializer>(
    chars: &[char],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&chars.iter().collect::<String>())
}

impl TextBuffer {
    /// Creates an empty buffer with the caret at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `text` with the caret at the end.
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replaces the whole content and moves the caret to the end.
    pub fn set_text(&mut self, text: &str) {
        self.content = text.chars().collect();
        self.collapse_to(self.content.len());
    }

    /// Content as a string.
    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    pub fn selection_end(&self) -> usize {
        self.selection_end
    }

    /// Returns `true` if a non-empty range is selected.
    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    /// Sets the selection, clamping both ends to the content and ordering them.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.content.len();
        let (start, end) = (start.min(len), end.min(len));
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    /// Collapses the selection to a caret at `position` (clamped).
    pub fn collapse_to(&mut self, position: usize) {
        self.set_selection(position, position);
    }

    /// Replaces the selection with `text` and moves the caret one position
    /// past the selection start.
    ///
    /// Every key types a single glyph, so the caret lands after it. A
    /// multi-character glyph leaves the caret after its first character.
    pub fn replace_selection(&mut self, text: &str) {
        let start = self.selection_start;

        self.content.splice(start..self.selection_end, text.chars());
        self.collapse_to(start + 1);
    }

    /// Deletes the selection, or the character before the caret.
    ///
    /// At the start of the buffer with no selection this does nothing.
    pub fn backspace(&mut self) {
        let start = self.selection_start;

        if self.has_selection() {
            self.content.drain(start..self.selection_end);
            self.collapse_to(start);
        } else if start > 0 {
            self.content.remove(start - 1);
            self.collapse_to(start - 1);
        }
    }

    /// Deletes the selection, or the character after the caret.
    ///
    /// At the end of the buffer with no selection this does nothing.
    pub fn delete_forward(&mut self) {
        let start = self.selection_start;

        if self.has_selection() {
            self.content.drain(start..self.selection_end);
        } else if start < self.content.len() {
            self.content.remove(start);
        }
        self.collapse_to(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str, start: usize, end: usize) -> TextBuffer {
        let mut buffer = TextBuffer::with_text(text);
        buffer.set_selection(start, end);
        buffer
    }

    fn assert_state(buffer: &TextBuffer, text: &str, caret: usize) {
        assert_eq!(buffer.text(), text);
        assert_eq!(buffer.selection_start(), caret);
        assert_eq!(buffer.selection_end(), caret);
    }

    #[test]
    fn test_insert_at_caret() {
        let mut b = buffer("ab", 1, 1);
        b.replace_selection("x");
        assert_state(&b, "axb", 2);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut b = buffer("hello", 1, 4);
        b.replace_selection("\t");
        assert_state(&b, "h\to", 2);
    }

    #[test]
    fn test_multi_character_insert_advances_one() {
        let mut b = buffer("xy", 1, 1);
        b.replace_selection("ab");
        assert_state(&b, "xaby", 2);

        let mut b = buffer("", 0, 0);
        b.replace_selection("");
        assert_state(&b, "", 0);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut b = TextBuffer::new();
        b.backspace();
        assert_state(&b, "", 0);

        let mut b = buffer("ab", 0, 0);
        b.backspace();
        assert_state(&b, "ab", 0);
    }

    #[test]
    fn test_backspace_deletes_previous_or_selection() {
        let mut b = buffer("abc", 2, 2);
        b.backspace();
        assert_state(&b, "ac", 1);

        let mut b = buffer("abcd", 1, 3);
        b.backspace();
        assert_state(&b, "ad", 1);
    }

    #[test]
    fn test_delete_forward() {
        let mut b = buffer("abc", 1, 1);
        b.delete_forward();
        assert_state(&b, "ac", 1);

        let mut b = buffer("abc", 3, 3);
        b.delete_forward();
        assert_state(&b, "abc", 3);

        let mut b = buffer("abcd", 1, 3);
        b.delete_forward();
        assert_state(&b, "ad", 1);
    }

    #[test]
    fn test_selection_is_clamped_and_ordered() {
        let b = buffer("abc", 10, 2);
        assert_eq!(b.selection_start(), 2);
        assert_eq!(b.selection_end(), 3);
    }

    #[test]
    fn test_positions_are_characters() {
        let mut b = buffer("привет", 3, 3);
        b.backspace();
        assert_state(&b, "првет", 2);
        b.replace_selection("и");
        assert_state(&b, "привет", 3);
    }

    #[test]
    fn test_serializes_content_as_string() {
        let json = serde_json::to_value(buffer("ab", 1, 2)).unwrap();
        assert_eq!(json["content"], "ab");
        assert_eq!(json["selection_start"], 1);
        assert_eq!(json["selection_end"], 2);
    }
}
