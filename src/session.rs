use crate::editor::PostEditor;
use crate::emoji::EmojiHistory;
use crate::error::{PostlineError, Result};
use crate::models::{Draft, Field, Post, PostId};
use crate::repository::PostRepository;
use crate::store::DurableStore;
use crate::view::{self, ExpansionSet};
use log::info;

/// Owns every piece of editor state for one run of the program.
///
/// Persisted state is read from the store exactly once, in [`Session::open`].
/// Each mutation writes the affected key before returning.
#[derive(Debug)]
pub struct Session<S: DurableStore> {
    store: S,
    repo: PostRepository,
    editor: PostEditor,
    emojis: EmojiHistory,
    expanded: ExpansionSet,
    picker_open: bool,
}

impl<S: DurableStore> Session<S> {
    pub fn open(store: S) -> Self {
        let repo = PostRepository::load_all(&store);
        let emojis = EmojiHistory::load(&store);
        info!(
            "Session opened with {} posts, {} recent and {} favorite emojis",
            repo.len(),
            emojis.recent().len(),
            emojis.favorites().len()
        );
        Self {
            store,
            repo,
            editor: PostEditor::new(),
            emojis,
            expanded: ExpansionSet::default(),
            picker_open: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn posts(&self) -> &[Post] {
        self.repo.posts()
    }

    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.repo.get(id)
    }

    pub fn draft(&self) -> &Draft {
        self.editor.draft()
    }

    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    pub fn emojis(&self) -> &EmojiHistory {
        &self.emojis
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn is_expanded(&self, id: PostId) -> bool {
        self.expanded.is_expanded(id)
    }

    pub fn edit(&mut self, field: Field, value: String, caret: Option<usize>) {
        self.editor.edit(field, value, caret);
    }

    pub fn record_cursor(&mut self, caret: Option<usize>) {
        self.editor.record_cursor(caret);
    }

    pub fn toggle_publish(&mut self) {
        self.editor.toggle_publish();
    }

    pub fn save_post(&mut self) -> Result<PostId> {
        self.editor.save(&mut self.repo, &mut self.store)
    }

    pub fn load_post(&mut self, id: PostId) -> Result<()> {
        let post = self.repo.get(id).ok_or(PostlineError::PostNotFound(id))?;
        self.editor.load(post);
        Ok(())
    }

    /// Remove a post; if it is the one being edited, the draft is emptied too.
    pub fn delete_post(&mut self, id: PostId) -> Result<()> {
        self.repo.remove(&mut self.store, id)?;
        self.editor.discard_if_current(id);
        Ok(())
    }

    /// Insert text at the content caret without touching emoji history.
    ///
    /// Returns the caret the content field should be focused at.
    pub fn insert_text(&mut self, text: &str) -> usize {
        self.editor.insert_text(text)
    }

    /// A glyph chosen in the picker: insert it, remember it, hide the picker.
    pub fn select_emoji(&mut self, glyph: &str) -> Result<usize> {
        let caret = self.editor.insert_text(glyph);
        let recorded = self.emojis.record_use(&mut self.store, glyph);
        self.picker_open = false;
        recorded.map(|_| caret)
    }

    pub fn toggle_favorite(&mut self, glyph: &str) -> Result<bool> {
        self.emojis.toggle_favorite(&mut self.store, glyph)
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn toggle_expansion(&mut self, id: PostId) {
        self.expanded.toggle(id);
    }

    pub fn timeline_items(&self) -> Vec<&Post> {
        view::timeline_items(self.repo.posts())
    }

    pub fn list_items(&self) -> Vec<&Post> {
        view::list_items(self.repo.posts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{POSTS_KEY, RECENT_EMOJIS_KEY};
    use crate::models::DraftId;
    use crate::store::MemoryStore;

    fn session() -> Session<MemoryStore> {
        Session::open(MemoryStore::new())
    }

    #[test]
    fn deleting_loaded_post_resets_editor() {
        let mut s = session();
        s.edit(Field::Title, "Hiring".into(), None);
        s.edit(Field::Content, "Join us".into(), Some(7));
        s.edit(Field::PublishDate, "2024-02-02".into(), None);
        s.toggle_publish();
        let id = s.save_post().unwrap();

        s.load_post(id).unwrap();
        assert_eq!(s.draft().id, DraftId::ExistingDraft(id));
        s.delete_post(id).unwrap();

        let draft = s.draft();
        assert!(draft.is_new());
        assert!(draft.title.is_empty());
        assert!(draft.content.is_empty());
        assert!(draft.publish_date.is_empty());
        assert!(!draft.is_published);
        assert!(s.posts().is_empty());
    }

    #[test]
    fn deleting_other_post_keeps_draft() {
        let mut s = session();
        s.edit(Field::Title, "a".into(), None);
        let a = s.save_post().unwrap();
        s.edit(Field::Title, "b".into(), None);
        let b = s.save_post().unwrap();

        s.load_post(a).unwrap();
        s.delete_post(b).unwrap();
        assert_eq!(s.draft().title, "a");
        assert_eq!(s.posts().len(), 1);
    }

    #[test]
    fn picker_selection_inserts_records_and_closes() {
        let mut s = session();
        s.edit(Field::Content, "Hello".into(), Some(5));
        s.toggle_picker();
        assert!(s.is_picker_open());

        let caret = s.select_emoji("🙂").unwrap();
        assert_eq!(caret, 7);
        assert_eq!(s.draft().content, "Hello🙂");
        assert_eq!(s.emojis().recent(), ["🙂"]);
        assert!(!s.is_picker_open());
        assert_eq!(s.store().raw(RECENT_EMOJIS_KEY), Some("[\"🙂\"]"));
    }

    #[test]
    fn quick_insert_leaves_recent_list_alone() {
        let mut s = session();
        s.edit(Field::Content, "Hi".into(), Some(2));
        s.insert_text("👋");
        assert_eq!(s.draft().content, "Hi👋");
        assert!(s.emojis().recent().is_empty());
    }

    #[test]
    fn load_unknown_post_is_an_error() {
        let mut s = session();
        assert!(matches!(
            s.load_post(PostId(42)),
            Err(PostlineError::PostNotFound(PostId(42)))
        ));
    }

    #[test]
    fn open_reads_persisted_state() {
        let mut s = session();
        s.edit(Field::Title, "kept".into(), None);
        s.save_post().unwrap();
        s.select_emoji("🚀").unwrap();
        s.toggle_favorite("🔥").unwrap();

        let reopened = Session::open(s.store().clone());
        assert_eq!(reopened.posts()[0].title, "kept");
        assert_eq!(reopened.emojis().recent(), ["🚀"]);
        assert_eq!(reopened.emojis().favorites(), ["🔥"]);
        assert!(reopened.store().raw(POSTS_KEY).is_some());
    }

    #[test]
    fn timeline_filters_unpublished() {
        let mut s = session();
        for (title, date, publish) in [
            ("old", "2024-01-01", true),
            ("draft", "2024-12-01", false),
            ("new", "2024-06-01", true),
        ] {
            s.edit(Field::Title, title.into(), None);
            s.edit(Field::PublishDate, date.into(), None);
            if publish {
                s.toggle_publish();
            }
            s.save_post().unwrap();
        }
        let titles: Vec<&str> = s.timeline_items().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
        assert_eq!(s.list_items().len(), 3);
    }
}
