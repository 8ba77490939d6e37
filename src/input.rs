use crate::cursor::{char_index_to_utf16, utf16_to_char_index};
use crossterm::event::{KeyCode, KeyModifiers};
use unicode_width::UnicodeWidthChar;

/// What a key press did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Unchanged,
    CaretMoved,
    Edited,
}

/// Editable text with a caret counted in characters.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    caret: usize,
    multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Caret as reported to the session, in UTF-16 code units.
    pub fn caret_utf16(&self) -> usize {
        char_index_to_utf16(&self.value, self.caret)
    }

    /// Replace the text, keeping the caret inside it.
    pub fn set_value(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
        }
        self.caret = self.caret.min(self.char_count());
    }

    pub fn set_caret_utf16(&mut self, offset: usize) {
        self.caret = utf16_to_char_index(&self.value, offset);
    }

    pub fn move_to_end(&mut self) {
        self.caret = self.char_count();
    }

    /// Hard-wrap the text to `width` columns.
    ///
    /// Returns the display rows and the caret's row and column within them.
    pub fn wrapped(&self, width: usize) -> (Vec<String>, (usize, usize)) {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut row = String::new();
        let mut row_width = 0;
        let mut caret = None;

        for (i, ch) in self.value.chars().enumerate() {
            let ch_width = if ch == '\n' { 0 } else { ch.width().unwrap_or(0) };
            if ch != '\n' && row_width > 0 && row_width + ch_width > width {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            if i == self.caret {
                caret = Some((rows.len(), row_width));
            }
            if ch == '\n' {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            } else {
                row.push(ch);
                row_width += ch_width;
            }
        }

        let caret = caret.unwrap_or(if row_width >= width {
            (rows.len() + 1, 0)
        } else {
            (rows.len(), row_width)
        });
        rows.push(row);
        (rows, caret)
    }

    /// The slice of a single-line value that fits in `width` columns with the
    /// caret visible, and the caret column inside it.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        let width = width.max(1);
        let chars: Vec<char> = self.value.chars().collect();
        let caret = self.caret.min(chars.len());
        let col_of = |from: usize| -> usize {
            chars[from..caret]
                .iter()
                .map(|c| c.width().unwrap_or(0))
                .sum()
        };

        // Keep one column free for the caret itself
        let mut start = 0;
        while start < caret && col_of(start) >= width {
            start += 1;
        }

        let mut visible = String::new();
        let mut used = 0;
        for &ch in &chars[start..] {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width {
                break;
            }
            visible.push(ch);
            used += ch_width;
        }
        (visible, col_of(start))
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FieldChange {
        let len = self.char_count();
        match code {
            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.insert_char(c);
                FieldChange::Edited
            }
            KeyCode::Enter if self.multiline => {
                self.insert_char('\n');
                FieldChange::Edited
            }
            KeyCode::Backspace if self.caret > 0 => {
                self.remove_char(self.caret - 1);
                self.caret -= 1;
                FieldChange::Edited
            }
            KeyCode::Delete if self.caret < len => {
                self.remove_char(self.caret);
                FieldChange::Edited
            }
            KeyCode::Left if self.caret > 0 => {
                self.caret -= 1;
                FieldChange::CaretMoved
            }
            KeyCode::Right if self.caret < len => {
                self.caret += 1;
                FieldChange::CaretMoved
            }
            KeyCode::Home => {
                self.caret = self.line_start(self.caret);
                FieldChange::CaretMoved
            }
            KeyCode::End => {
                self.caret = self.line_end(self.caret);
                FieldChange::CaretMoved
            }
            KeyCode::Up if self.multiline => self.move_vertical(false),
            KeyCode::Down if self.multiline => self.move_vertical(true),
            _ => FieldChange::Unchanged,
        }
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.caret);
        self.value.insert(idx, c);
        self.caret += 1;
    }

    fn remove_char(&mut self, char_index: usize) {
        let idx = self.byte_index(char_index);
        self.value.remove(idx);
    }

    fn line_start(&self, caret: usize) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = caret.min(chars.len());
        while pos > 0 && chars[pos - 1] != '\n' {
            pos -= 1;
        }
        pos
    }

    fn line_end(&self, caret: usize) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = caret.min(chars.len());
        while pos < chars.len() && chars[pos] != '\n' {
            pos += 1;
        }
        pos
    }

    fn move_vertical(&mut self, down: bool) -> FieldChange {
        let start = self.line_start(self.caret);
        let column = self.caret - start;
        let target_start = if down {
            let end = self.line_end(self.caret);
            if end >= self.char_count() {
                return FieldChange::Unchanged;
            }
            end + 1
        } else {
            if start == 0 {
                return FieldChange::Unchanged;
            }
            self.line_start(start - 1)
        };
        let target_end = self.line_end(target_start);
        self.caret = (target_start + column).min(target_end);
        FieldChange::CaretMoved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn typing_and_backspace_track_caret() {
        let mut field = TextField::single_line();
        type_str(&mut field, "héllo");
        assert_eq!(field.caret(), 5);
        assert_eq!(
            field.handle_key(KeyCode::Backspace, KeyModifiers::NONE),
            FieldChange::Edited
        );
        assert_eq!(field.value(), "héll");
        field.handle_key(KeyCode::Left, KeyModifiers::NONE);
        field.handle_key(KeyCode::Left, KeyModifiers::NONE);
        type_str(&mut field, "X");
        assert_eq!(field.value(), "héXll");
    }

    #[test]
    fn caret_reports_utf16_units() {
        let mut field = TextField::multi_line();
        field.set_value("🙂a");
        field.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(field.caret(), 2);
        assert_eq!(field.caret_utf16(), 3);
        field.set_caret_utf16(2);
        assert_eq!(field.caret(), 1);
    }

    #[test]
    fn enter_only_breaks_lines_in_multiline_fields() {
        let mut single = TextField::single_line();
        assert_eq!(
            single.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            FieldChange::Unchanged
        );

        let mut multi = TextField::multi_line();
        type_str(&mut multi, "ab");
        multi.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        type_str(&mut multi, "c");
        assert_eq!(multi.value(), "ab\nc");
        assert_eq!(multi.wrapped(10).1, (1, 1));
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut field = TextField::multi_line();
        field.set_value("abcd\nxy\nlong line");
        field.set_caret_utf16(3);
        field.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(field.caret(), 7);
        field.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(field.caret(), 10);
        field.handle_key(KeyCode::Up, KeyModifiers::NONE);
        field.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn long_lines_wrap_and_caret_follows() {
        let mut field = TextField::multi_line();
        field.set_value(&format!("{}ZQX", "a".repeat(10)));
        field.move_to_end();
        let (rows, caret) = field.wrapped(4);
        assert_eq!(rows, vec!["aaaa", "aaaa", "aaZQ", "X"]);
        assert_eq!(caret, (3, 1));

        field.set_caret_utf16(4);
        assert_eq!(field.wrapped(4).1, (1, 0));
    }

    #[test]
    fn caret_at_full_row_moves_to_next_row() {
        let mut field = TextField::multi_line();
        field.set_value("abcd");
        field.move_to_end();
        assert_eq!(field.wrapped(4).1, (1, 0));
        field.set_value("ab\ncd");
        field.move_to_end();
        assert_eq!(field.wrapped(4), (vec!["ab".to_string(), "cd".to_string()], (1, 2)));
    }

    #[test]
    fn wide_glyphs_wrap_by_display_width() {
        let mut field = TextField::multi_line();
        field.set_value("abc🙂");
        field.move_to_end();
        let (rows, caret) = field.wrapped(4);
        assert_eq!(rows, vec!["abc", "🙂"]);
        assert_eq!(caret, (1, 2));
    }

    #[test]
    fn single_line_window_keeps_caret_visible() {
        let mut field = TextField::single_line();
        field.set_value("0123456789");
        field.move_to_end();
        assert_eq!(field.visible_window(4), ("789".to_string(), 3));

        field.set_caret_utf16(0);
        assert_eq!(field.visible_window(4), ("0123".to_string(), 0));

        field.set_value("ab");
        assert_eq!(field.visible_window(4), ("ab".to_string(), 0));
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut field = TextField::single_line();
        assert_eq!(
            field.handle_key(KeyCode::Char('s'), KeyModifiers::CONTROL),
            FieldChange::Unchanged
        );
        assert!(field.value().is_empty());
    }
}
