//! Caret tracking and text insertion for the content field.
//!
//! Offsets are counted in UTF-16 code units, so a two-unit emoji advances the
//! caret by two. No grapheme-cluster correction is applied.

use log::debug;

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Byte offset for a UTF-16 offset.
///
/// Offsets past the end clamp to the end; an offset inside a surrogate pair
/// rounds down to the start of that character.
pub fn utf16_to_byte_offset(s: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in s.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return idx;
        }
        units = next;
    }
    s.len()
}

/// UTF-16 offset of the character at `char_index`.
pub fn char_index_to_utf16(s: &str, char_index: usize) -> usize {
    s.chars().take(char_index).map(char::len_utf16).sum()
}

/// Character index containing the UTF-16 `offset`, rounded down.
pub fn utf16_to_char_index(s: &str, offset: usize) -> usize {
    let byte = utf16_to_byte_offset(s, offset);
    s[..byte].chars().count()
}

/// Remembers where the next inserted text lands in the content field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextInserter {
    position: usize,
}

impl TextInserter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Record the caret reported by the control; `None` keeps the previous value.
    pub fn record_cursor(&mut self, offset: Option<usize>) {
        if let Some(offset) = offset {
            self.position = offset;
        }
    }

    /// Splice `text` into `content` at the tracked caret and advance past it.
    ///
    /// Returns the new caret so the caller can move focus there.
    pub fn insert_at(&mut self, content: &mut String, text: &str) -> usize {
        let byte = utf16_to_byte_offset(content, self.position);
        let base = utf16_len(&content[..byte]);
        content.insert_str(byte, text);
        self.position = base + utf16_len(text);
        debug!("Inserted {:?} at {}, caret now {}", text, base, self.position);
        self.position
    }
}
