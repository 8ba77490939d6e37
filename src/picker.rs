//! Terminal emoji picker.
//!
//! The picker only hands back a glyph or asks to be hidden; what happens with
//! the glyph is up to the session.

pub struct EmojiCategory {
    pub name: &'static str,
    pub glyphs: &'static [&'static str],
}

pub const CATALOG: &[EmojiCategory] = &[
    EmojiCategory {
        name: "Smileys",
        glyphs: &["😀", "😄", "😊", "🙂", "😉", "😍", "🤔", "😎", "🥳", "😅", "😂", "🙌"],
    },
    EmojiCategory {
        name: "Gestures",
        glyphs: &["👍", "👏", "🙏", "💪", "👋", "🤝", "✌️", "👉", "👀", "🫶"],
    },
    EmojiCategory {
        name: "Work",
        glyphs: &["💼", "📈", "📊", "🗓️", "💡", "🧠", "🛠️", "💻", "📌", "✅", "🎯", "📝"],
    },
    EmojiCategory {
        name: "Celebration",
        glyphs: &["🎉", "🚀", "🔥", "✨", "🏆", "🌟", "💯", "🎊", "❤️", "📢"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Selected(String),
    Dismissed,
}

/// One row of glyphs as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow {
    pub name: String,
    pub glyphs: Vec<String>,
}

/// Highlight state over the catalog, with favorites prepended as a row.
#[derive(Debug, Clone, Default)]
pub struct EmojiPicker {
    row: usize,
    col: usize,
}

impl EmojiPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(favorites: &[String]) -> Vec<PickerRow> {
        let mut rows = Vec::with_capacity(CATALOG.len() + 1);
        if !favorites.is_empty() {
            rows.push(PickerRow {
                name: "Favorites".to_string(),
                glyphs: favorites.to_vec(),
            });
        }
        rows.extend(CATALOG.iter().map(|category| PickerRow {
            name: category.name.to_string(),
            glyphs: category.glyphs.iter().map(|g| g.to_string()).collect(),
        }));
        rows
    }

    pub fn highlight(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn highlighted(&self, rows: &[PickerRow]) -> Option<String> {
        rows.get(self.row)
            .and_then(|row| row.glyphs.get(self.col))
            .cloned()
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self, rows: &[PickerRow]) {
        let len = rows.get(self.row).map_or(0, |row| row.glyphs.len());
        if self.col + 1 < len {
            self.col += 1;
        }
    }

    pub fn move_up(&mut self, rows: &[PickerRow]) {
        self.row = self.row.saturating_sub(1);
        self.clamp(rows);
    }

    pub fn move_down(&mut self, rows: &[PickerRow]) {
        if self.row + 1 < rows.len() {
            self.row += 1;
        }
        self.clamp(rows);
    }

    /// Keep the highlight inside the rows after they change shape.
    pub fn clamp(&mut self, rows: &[PickerRow]) {
        if rows.is_empty() {
            self.row = 0;
            self.col = 0;
            return;
        }
        self.row = self.row.min(rows.len() - 1);
        self.col = self.col.min(rows[self.row].glyphs.len().saturating_sub(1));
    }

    /// Name of the row under the highlight.
    pub fn highlighted_row(&self, rows: &[PickerRow]) -> Option<String> {
        rows.get(self.row).map(|row| row.name.clone())
    }

    /// Put the highlight back on `glyph` after the rows changed shape.
    ///
    /// Prefers the row called `row_name`, then any row holding the glyph.
    pub fn relocate(&mut self, rows: &[PickerRow], row_name: &str, glyph: &str) {
        let find = |row: &PickerRow| row.glyphs.iter().position(|g| g == glyph);
        let hit = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.name == row_name)
            .chain(rows.iter().enumerate())
            .find_map(|(r, row)| find(row).map(|c| (r, c)));

        match hit {
            Some((row, col)) => {
                self.row = row;
                self.col = col;
            }
            None => self.clamp(rows),
        }
    }

    pub fn select(&self, rows: &[PickerRow]) -> Option<PickerEvent> {
        self.highlighted(rows).map(PickerEvent::Selected)
    }
}
