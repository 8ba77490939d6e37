use crate::cursor::TextInserter;
use crate::error::Result;
use crate::models::{Draft, DraftId, Field, Post, PostId};
use crate::repository::PostRepository;
use crate::store::DurableStore;
use log::debug;

/// The single draft being composed, plus the caret of its content field.
///
/// Whether the draft is new or an edit of a saved post is carried by
/// [`DraftId`]; there is no separate mode flag.
#[derive(Debug, Default)]
pub struct PostEditor {
    draft: Draft,
    inserter: TextInserter,
}

impl PostEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.inserter.position()
    }

    /// Replace one field; content edits also record the caret reported with them.
    pub fn edit(&mut self, field: Field, value: String, caret: Option<usize>) {
        match field {
            Field::Title => self.draft.title = value,
            Field::PublishDate => self.draft.publish_date = value,
            Field::Content => {
                self.draft.content = value;
                self.inserter.record_cursor(caret);
            }
        }
    }

    /// Caret update from a click inside the content field.
    pub fn record_cursor(&mut self, caret: Option<usize>) {
        self.inserter.record_cursor(caret);
    }

    pub fn toggle_publish(&mut self) {
        self.draft.is_published = !self.draft.is_published;
    }

    /// Insert `text` into the content at the caret; returns the new caret.
    pub fn insert_text(&mut self, text: &str) -> usize {
        self.inserter.insert_at(&mut self.draft.content, text)
    }

    /// Commit the draft and start over with an empty one.
    pub fn save(
        &mut self,
        repo: &mut PostRepository,
        store: &mut impl DurableStore,
    ) -> Result<PostId> {
        let draft = std::mem::take(&mut self.draft);
        match repo.upsert(store, draft.clone()) {
            Ok(id) => Ok(id),
            Err(e) => {
                // Nothing was committed, keep the user's text
                self.draft = draft;
                Err(e)
            }
        }
    }

    /// Copy a saved post into the draft, discarding whatever was there.
    pub fn load(&mut self, post: &Post) {
        debug!("Loading post {} into the editor", post.id);
        self.draft = Draft::from(post);
    }

    /// Reset to an empty draft if `id` is the one being edited.
    pub fn discard_if_current(&mut self, id: PostId) -> bool {
        if self.draft.id == DraftId::ExistingDraft(id) {
            self.draft = Draft::default();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn save_resets_to_empty_draft() {
        let mut store = MemoryStore::new();
        let mut repo = PostRepository::load_all(&store);
        let mut editor = PostEditor::new();
        editor.edit(Field::Title, "Launch".into(), None);
        editor.edit(Field::Content, "We shipped".into(), Some(10));
        editor.edit(Field::PublishDate, "2024-06-01".into(), None);
        editor.toggle_publish();

        let id = editor.save(&mut repo, &mut store).unwrap();
        assert_eq!(editor.draft(), &Draft::default());
        let saved = repo.get(id).unwrap();
        assert_eq!(saved.title, "Launch");
        assert!(saved.is_published);
    }

    #[test]
    fn load_enters_existing_state() {
        let mut store = MemoryStore::new();
        let mut repo = PostRepository::load_all(&store);
        let mut editor = PostEditor::new();
        editor.edit(Field::Title, "A".into(), None);
        let id = editor.save(&mut repo, &mut store).unwrap();

        editor.edit(Field::Title, "unsaved work".into(), None);
        editor.load(repo.get(id).unwrap());
        assert_eq!(editor.draft().id, DraftId::ExistingDraft(id));
        assert_eq!(editor.draft().title, "A");

        editor.edit(Field::Title, "A2".into(), None);
        editor.save(&mut repo, &mut store).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(id).unwrap().title, "A2");
    }

    #[test]
    fn only_content_edits_move_the_caret() {
        let mut editor = PostEditor::new();
        editor.edit(Field::Content, "abc".into(), Some(2));
        editor.edit(Field::Title, "t".into(), Some(0));
        assert_eq!(editor.cursor(), 2);
        editor.edit(Field::Content, "abcd".into(), None);
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn discard_only_matches_current_post() {
        let mut editor = PostEditor::new();
        let post = Post {
            id: PostId(9),
            title: "t".into(),
            content: "c".into(),
            publish_date: "2024-01-01".into(),
            is_published: true,
        };
        editor.load(&post);
        assert!(!editor.discard_if_current(PostId(10)));
        assert_eq!(editor.draft().title, "t");
        assert!(editor.discard_if_current(PostId(9)));
        assert_eq!(editor.draft(), &Draft::default());
    }
}
