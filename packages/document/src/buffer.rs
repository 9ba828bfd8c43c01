//! Editable buffer: one language's source text plus its cursor offset.
//!
//! Offsets are character offsets, never bytes. The cursor is tracked on
//! every interaction that can move it (typing, pointer click, key release)
//! and clamps rather than errors, because a widget can always report a
//! position for text it no longer shows. Splices validate instead: an
//! out-of-range insertion offset is a caller bug.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Language;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Offset {offset} out of range for buffer of {len} characters")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// One language's editable source text and cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buffer {
    language: Language,
    text: String,
    cursor: usize,
}

impl Buffer {
    pub fn new(language: Language, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
            cursor: 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the text is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Full replace. Keeps the cursor in range of the new text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.cursor.min(self.len_chars());
    }

    /// Track the interactive cursor. Out-of-range offsets clamp to the end.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.len_chars());
    }

    /// Splice `snippet` into the text at character `offset`, returning the
    /// offset just past the inserted snippet. The cursor is not moved here;
    /// the editor surface repositions it after the mutation is committed.
    pub fn insert_at(&mut self, offset: usize, snippet: &str) -> Result<usize, DocumentError> {
        let len = self.len_chars();
        if offset > len {
            return Err(DocumentError::OffsetOutOfRange { offset, len });
        }

        let byte_offset = char_to_byte(&self.text, offset);
        self.text.insert_str(byte_offset, snippet);
        Ok(offset + snippet.chars().count())
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_splices_text() {
        let mut buffer = Buffer::new(Language::Html, "<div>");
        let new_offset = buffer.insert_at(5, "</div>").unwrap();

        assert_eq!(buffer.text(), "<div></div>");
        assert_eq!(new_offset, 11);
    }

    #[test]
    fn test_insert_at_every_valid_offset() {
        let base = "abc";
        for offset in 0..=base.len() {
            let mut buffer = Buffer::new(Language::Css, base);
            let new_offset = buffer.insert_at(offset, "XY").unwrap();

            let expected: String = {
                let (head, tail) = base.split_at(offset);
                format!("{head}XY{tail}")
            };
            assert_eq!(buffer.text(), expected);
            assert_eq!(new_offset, offset + 2);
        }
    }

    #[test]
    fn test_insert_at_multibyte_text() {
        let mut buffer = Buffer::new(Language::Html, "héllo");
        // Offset 2 is between 'é' and 'l' in characters.
        let new_offset = buffer.insert_at(2, "ø").unwrap();

        assert_eq!(buffer.text(), "héøllo");
        assert_eq!(new_offset, 3);
    }

    #[test]
    fn test_insert_at_rejects_out_of_range() {
        let mut buffer = Buffer::new(Language::Javascript, "ab");
        let err = buffer.insert_at(3, "x").unwrap_err();
        assert_eq!(err, DocumentError::OffsetOutOfRange { offset: 3, len: 2 });
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buffer = Buffer::new(Language::Html, "abcdef");
        buffer.set_cursor(6);
        buffer.set_text("ab");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_set_cursor_clamps_to_len() {
        let mut buffer = Buffer::new(Language::Html, "abc");
        buffer.set_cursor(99);
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_is_blank() {
        assert!(Buffer::new(Language::Css, "").is_blank());
        assert!(Buffer::new(Language::Css, "  \n\t").is_blank());
        assert!(!Buffer::new(Language::Css, "a {}").is_blank());
    }
}
