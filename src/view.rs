use crate::models::{Post, PostId};
use std::collections::HashSet;

/// All posts, newest publish date first. Equal dates keep repository order.
pub fn list_items(posts: &[Post]) -> Vec<&Post> {
    let mut items: Vec<&Post> = posts.iter().collect();
    // sort_by_key is stable
    items.sort_by_key(|post| std::cmp::Reverse(post.publish_timestamp()));
    items
}

/// Published posts only, in list order.
pub fn timeline_items(posts: &[Post]) -> Vec<&Post> {
    list_items(posts)
        .into_iter()
        .filter(|post| post.is_published)
        .collect()
}

/// Post ids whose full content is shown in the list.
#[derive(Debug, Default, Clone)]
pub struct ExpansionSet {
    expanded: HashSet<PostId>,
}

impl ExpansionSet {
    pub fn toggle(&mut self, id: PostId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: PostId) -> bool {
        self.expanded.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, date: &str, published: bool) -> Post {
        Post {
            id: PostId(id),
            title: format!("post {}", id),
            content: String::new(),
            publish_date: date.to_string(),
            is_published: published,
        }
    }

    #[test]
    fn timeline_has_only_published_newest_first() {
        let posts = vec![
            post(1, "2024-01-01", true),
            post(2, "2024-03-01", false),
            post(3, "2024-06-01", true),
        ];
        let ids: Vec<u64> = timeline_items(&posts).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn list_keeps_drafts_and_is_stable() {
        let posts = vec![
            post(1, "", false),
            post(2, "2024-06-01", true),
            post(3, "garbage", false),
            post(4, "2024-06-01", false),
        ];
        let ids: Vec<u64> = list_items(&posts).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn expansion_toggles() {
        let mut set = ExpansionSet::default();
        set.toggle(PostId(5));
        assert!(set.is_expanded(PostId(5)));
        set.toggle(PostId(5));
        assert!(!set.is_expanded(PostId(5)));
    }
}
