use crate::config::POSTS_KEY;
use crate::error::Result;
use crate::models::{Draft, DraftId, Post, PostId};
use crate::store::{load_json, save_json, DurableStore};
use chrono::Utc;
use log::debug;

/// In-memory post list mirrored to the durable store on every mutation.
#[derive(Debug, Default)]
pub struct PostRepository {
    posts: Vec<Post>,
}

impl PostRepository {
    /// Read the persisted list; an absent or corrupt entry yields an empty list.
    pub fn load_all(store: &impl DurableStore) -> Self {
        let posts: Vec<Post> = load_json(store, POSTS_KEY).unwrap_or_default();
        debug!("Loaded {} posts", posts.len());
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Persist `posts` first, then swap it in as the in-memory list.
    pub fn save_all(&mut self, store: &mut impl DurableStore, posts: Vec<Post>) -> Result<()> {
        save_json(store, POSTS_KEY, &posts)?;
        self.posts = posts;
        Ok(())
    }

    /// Append a new draft under a fresh id, or replace the post the draft was loaded from.
    pub fn upsert(&mut self, store: &mut impl DurableStore, draft: Draft) -> Result<PostId> {
        let mut posts = self.posts.clone();
        let id = match draft.id {
            DraftId::NewDraft => {
                let id = self.next_id(Utc::now().timestamp_millis());
                posts.push(draft.into_post(id));
                debug!("Created post {}", id);
                id
            }
            DraftId::ExistingDraft(id) => {
                let updated = draft.into_post(id);
                for post in posts.iter_mut().filter(|post| post.id == id) {
                    *post = updated.clone();
                }
                debug!("Updated post {}", id);
                id
            }
        };
        self.save_all(store, posts)?;
        Ok(id)
    }

    /// Drop the post with `id`; removing an unknown id still rewrites the same list.
    pub fn remove(&mut self, store: &mut impl DurableStore, id: PostId) -> Result<()> {
        let posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|post| post.id != id)
            .cloned()
            .collect();
        debug!("Removed post {} ({} -> {})", id, self.posts.len(), posts.len());
        self.save_all(store, posts)
    }

    fn next_id(&self, now_millis: i64) -> PostId {
        let candidate = PostId(now_millis.max(1) as u64);
        if self.get(candidate).is_none() {
            return candidate;
        }
        let max = self.posts.iter().map(|post| post.id.0).max().unwrap_or(0);
        PostId(max + 1)
    }
}
