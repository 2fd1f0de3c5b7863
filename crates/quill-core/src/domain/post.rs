use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Titles shorter than this are rejected.
pub const MIN_TITLE_LEN: usize = 4;
/// Longer titles are truncated, not rejected.
pub const MAX_TITLE_LEN: usize = 300;
/// Longer texts are truncated, not rejected.
pub const MAX_TEXT_LEN: usize = 20_000;

/// Display format of the `created` timestamp in log output.
pub const CREATED_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Post entity - a titled, authored piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub text: Option<String>,
    pub author: String,
    pub created: DateTime<Utc>,
}

/// A post that has not been stored yet; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub text: Option<String>,
    pub author: String,
    pub created: DateTime<Utc>,
}

/// Validated and clamped post input.
///
/// The only way to obtain one is [`PostDraft::parse`], so holding a draft
/// means the title and author are non-blank and every field is within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    text: Option<String>,
    author: String,
}

impl PostDraft {
    /// Validate raw input, truncating over-long title and text.
    pub fn parse(
        title: String,
        text: Option<String>,
        author: String,
    ) -> Result<Self, DomainError> {
        let mut errors = Vec::new();

        if title.trim().is_empty() {
            errors.push("title must not be blank".to_string());
        } else if title.chars().count() < MIN_TITLE_LEN {
            errors.push(format!(
                "title must be at least {MIN_TITLE_LEN} characters"
            ));
        }
        if author.trim().is_empty() {
            errors.push("author must not be blank".to_string());
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            title: clamp(title, MAX_TITLE_LEN),
            text: text.map(|text| clamp(text, MAX_TEXT_LEN)),
            author,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Turn the draft into an insertable post stamped with `created`.
    pub fn into_new_post(self, created: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title,
            text: self.text,
            author: self.author,
            created,
        }
    }
}

/// The subset of mutable columns whose values differ from the stored post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the text.
    pub text: Option<Option<String>>,
}

impl PostChanges {
    /// Compare a draft against the stored post. Only `title` and `text` are
    /// mutable; the author is validated but never updated.
    pub fn between(stored: &Post, draft: &PostDraft) -> Self {
        Self {
            title: (stored.title != draft.title).then(|| draft.title.clone()),
            text: (stored.text != draft.text).then(|| draft.text.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none()
    }

    /// Apply the changes to a post in place.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title.clone_from(title);
        }
        if let Some(text) = &self.text {
            post.text.clone_from(text);
        }
    }
}

/// Current UTC time at second precision.
pub fn created_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Truncate to at most `max` characters without splitting a character.
fn clamp(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, text: Option<&str>, author: &str) -> Result<PostDraft, DomainError> {
        PostDraft::parse(title.to_string(), text.map(str::to_string), author.to_string())
    }

    fn stored() -> Post {
        Post {
            id: 7,
            title: "Hello World".to_string(),
            text: Some("body".to_string()),
            author: "Alice".to_string(),
            created: created_now(),
        }
    }

    #[test]
    fn test_short_titles_are_rejected() {
        for title in ["a", "ab", "abc"] {
            assert!(matches!(
                draft(title, None, "Alice"),
                Err(DomainError::Validation(_))
            ));
        }
        assert!(draft("abcd", None, "Alice").is_ok());
    }

    #[test]
    fn test_blank_author_is_rejected_even_with_valid_title() {
        let err = draft("A perfectly fine title", None, "   ").unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors, vec!["author must not be blank".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_all_violations_are_reported() {
        let err = draft(" ", None, "").unwrap_err();
        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_title_is_truncated() {
        let title = "t".repeat(MAX_TITLE_LEN + 25);
        let draft = draft(&title, None, "Alice").unwrap();
        assert_eq!(draft.title(), &title[..MAX_TITLE_LEN]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "x".repeat(MAX_TEXT_LEN + 1);
        let draft = draft("Title", Some(&text), "Alice").unwrap();
        assert_eq!(draft.text().map(str::len), Some(MAX_TEXT_LEN));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let title = "é".repeat(MAX_TITLE_LEN + 1);
        let draft = draft(&title, None, "Alice").unwrap();
        assert_eq!(draft.title().chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_changes_only_text() {
        let draft = draft("Hello World", Some("new body"), "Alice").unwrap();
        let changes = PostChanges::between(&stored(), &draft);
        assert_eq!(changes.title, None);
        assert_eq!(changes.text, Some(Some("new body".to_string())));
    }

    #[test]
    fn test_changes_ignore_author() {
        let draft = draft("Hello World", Some("body"), "Bob").unwrap();
        assert!(PostChanges::between(&stored(), &draft).is_empty());
    }

    #[test]
    fn test_apply_changes() {
        let mut post = stored();
        let changes = PostChanges {
            title: Some("Renamed".to_string()),
            text: Some(None),
        };
        changes.apply_to(&mut post);
        assert_eq!(post.title, "Renamed");
        assert_eq!(post.text, None);
    }
}
