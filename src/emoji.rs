use crate::config::{FAVORITE_EMOJIS_KEY, RECENT_EMOJIS_KEY};
use crate::error::Result;
use crate::store::{load_json, save_json, DurableStore};
use log::debug;

pub const MAX_RECENT_EMOJIS: usize = 10;

/// Recently used and favorite glyphs, each persisted under its own key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmojiHistory {
    recent: Vec<String>,
    favorites: Vec<String>,
}

impl EmojiHistory {
    pub fn load(store: &impl DurableStore) -> Self {
        Self {
            recent: load_json(store, RECENT_EMOJIS_KEY).unwrap_or_default(),
            favorites: load_json(store, FAVORITE_EMOJIS_KEY).unwrap_or_default(),
        }
    }

    /// Most recently used first.
    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, glyph: &str) -> bool {
        self.favorites.iter().any(|g| g == glyph)
    }

    /// Move `glyph` to the front of the recent list, evicting past the cap.
    pub fn record_use(&mut self, store: &mut impl DurableStore, glyph: &str) -> Result<()> {
        let recent: Vec<String> = std::iter::once(glyph.to_string())
            .chain(self.recent.iter().filter(|g| *g != glyph).cloned())
            .take(MAX_RECENT_EMOJIS)
            .collect();
        save_json(store, RECENT_EMOJIS_KEY, &recent)?;
        self.recent = recent;
        Ok(())
    }

    /// Add `glyph` to the favorites, or remove it if already there.
    pub fn toggle_favorite(&mut self, store: &mut impl DurableStore, glyph: &str) -> Result<bool> {
        let mut favorites = self.favorites.clone();
        let added = if let Some(pos) = favorites.iter().position(|g| g == glyph) {
            favorites.remove(pos);
            false
        } else {
            favorites.push(glyph.to_string());
            true
        };
        save_json(store, FAVORITE_EMOJIS_KEY, &favorites)?;
        self.favorites = favorites;
        debug!("Favorite {} {}", glyph, if added { "added" } else { "removed" });
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn reuse_moves_glyph_to_front() {
        let mut store = MemoryStore::new();
        let mut history = EmojiHistory::load(&store);
        for glyph in ["A", "B", "A", "C"] {
            history.record_use(&mut store, glyph).unwrap();
        }
        assert_eq!(history.recent(), ["C", "A", "B"]);
    }

    #[test]
    fn recent_list_is_capped_at_ten() {
        let mut store = MemoryStore::new();
        let mut history = EmojiHistory::load(&store);
        let glyphs: Vec<String> = (0..15).map(|i| format!("g{}", i)).collect();
        for glyph in &glyphs {
            history.record_use(&mut store, glyph).unwrap();
        }
        assert_eq!(history.recent().len(), MAX_RECENT_EMOJIS);
        assert_eq!(history.recent()[0], "g14");
        assert_eq!(history.recent()[9], "g5");
        assert!(!history.recent().iter().any(|g| g == "g4"));

        let reloaded = EmojiHistory::load(&store);
        assert_eq!(reloaded.recent(), history.recent());
    }

    #[test]
    fn favorite_toggles_membership() {
        let mut store = MemoryStore::new();
        let mut history = EmojiHistory::load(&store);
        assert!(history.toggle_favorite(&mut store, "🔥").unwrap());
        assert!(history.toggle_favorite(&mut store, "🚀").unwrap());
        assert!(history.is_favorite("🔥"));
        assert!(!history.toggle_favorite(&mut store, "🔥").unwrap());
        assert_eq!(history.favorites(), ["🚀"]);
        assert_eq!(EmojiHistory::load(&store).favorites(), ["🚀"]);
    }
}
