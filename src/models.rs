use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted identity of a post, assigned from the creation timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub is_published: bool,
}

impl Post {
    /// Publish date as milliseconds since the epoch.
    ///
    /// Empty or unparsable dates sort as the epoch itself.
    pub fn publish_timestamp(&self) -> i64 {
        parse_publish_date(&self.publish_date).unwrap_or(0)
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) and full RFC 3339 timestamps.
pub fn parse_publish_date(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Whether the draft in the editor already has a persisted counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftId {
    #[default]
    NewDraft,
    ExistingDraft(PostId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub id: DraftId,
    pub title: String,
    pub content: String,
    pub publish_date: String,
    pub is_published: bool,
}

impl Draft {
    pub fn is_new(&self) -> bool {
        self.id == DraftId::NewDraft
    }

    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            publish_date: self.publish_date,
            is_published: self.is_published,
        }
    }
}

impl From<&Post> for Draft {
    fn from(post: &Post) -> Self {
        Self {
            id: DraftId::ExistingDraft(post.id),
            title: post.title.clone(),
            content: post.content.clone(),
            publish_date: post.publish_date.clone(),
            is_published: post.is_published,
        }
    }
}

/// Editable text fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    PublishDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_uses_camel_case_keys() {
        let post = Post {
            id: PostId(1712000000000),
            title: "Hi".into(),
            content: "Body".into(),
            publish_date: "2024-01-01".into(),
            is_published: true,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 1712000000000u64);
        assert_eq!(json["publishDate"], "2024-01-01");
        assert_eq!(json["isPublished"], true);
    }

    #[test]
    fn invalid_dates_fall_back_to_epoch() {
        let mut post = Post {
            id: PostId(1),
            title: String::new(),
            content: String::new(),
            publish_date: String::new(),
            is_published: false,
        };
        assert_eq!(post.publish_timestamp(), 0);
        post.publish_date = "not a date".into();
        assert_eq!(post.publish_timestamp(), 0);
        post.publish_date = "1970-01-02".into();
        assert_eq!(post.publish_timestamp(), 86_400_000);
    }

    #[test]
    fn rfc3339_dates_parse() {
        assert_eq!(
            parse_publish_date("1970-01-01T00:00:01Z"),
            Some(1000)
        );
    }

    #[test]
    fn draft_from_post_is_existing() {
        let post = Post {
            id: PostId(7),
            title: "t".into(),
            content: "c".into(),
            publish_date: String::new(),
            is_published: true,
        };
        let draft = Draft::from(&post);
        assert_eq!(draft.id, DraftId::ExistingDraft(PostId(7)));
        assert!(!draft.is_new());
        assert_eq!(draft.into_post(PostId(7)), post);
    }
}
