use serde::{Deserialize, Deserializer};
use std::fmt;

pub const MAX_TITLE_LEN: usize = 250;
pub const MAX_SUBTITLE_LEN: usize = 250;
pub const MAX_COMMENT_LEN: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContentError {
    EmptyTitle,
    TitleTooLong,
    EmptySubtitle,
    SubtitleTooLong,
    EmptyBody,
    EmptyComment,
    CommentTooLong,
}

impl fmt::Display for PostContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostContentError::EmptyTitle => write!(f, "Title is required."),
            PostContentError::TitleTooLong => {
                write!(f, "Title must be at most {} characters.", MAX_TITLE_LEN)
            }
            PostContentError::EmptySubtitle => write!(f, "Subtitle is required."),
            PostContentError::SubtitleTooLong => {
                write!(f, "Subtitle must be at most {} characters.", MAX_SUBTITLE_LEN)
            }
            PostContentError::EmptyBody => write!(f, "Post content is required."),
            PostContentError::EmptyComment => write!(f, "Comment is required."),
            PostContentError::CommentTooLong => {
                write!(f, "Comment must be at most {} characters.", MAX_COMMENT_LEN)
            }
        }
    }
}

impl std::error::Error for PostContentError {}

/// Title, subtitle and body of a post, trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    subtitle: String,
    body: String,
}

impl PostDraft {
    pub fn new(title: &str, subtitle: &str, body: &str) -> Result<Self, PostContentError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PostContentError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(PostContentError::TitleTooLong);
        }

        let subtitle = subtitle.trim();
        if subtitle.is_empty() {
            return Err(PostContentError::EmptySubtitle);
        }
        if subtitle.chars().count() > MAX_SUBTITLE_LEN {
            return Err(PostContentError::SubtitleTooLong);
        }

        // Body keeps its own whitespace; it is HTML from the editor.
        if body.trim().is_empty() {
            return Err(PostContentError::EmptyBody);
        }

        Ok(Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(body: &str) -> Result<Self, PostContentError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(PostContentError::EmptyComment);
        }
        if body.chars().count() > MAX_COMMENT_LEN {
            return Err(PostContentError::CommentTooLong);
        }
        Ok(Self(body.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for CommentBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CommentBody::new(&raw).map_err(serde::de::Error::custom)
    }
}
