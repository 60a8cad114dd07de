// src/modules/blog/application/ports/outgoing/post_query.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::blog::domain::entities::Post;

//
// ──────────────────────────────────────────────────────────
// Read models
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
    pub avatar_url: String,
}

/// Card shown on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub author: AuthorView,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommentView {
    pub id: i32,
    pub body: String,
    pub author: AuthorView,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PostDetail {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub author: AuthorView,
    pub created_on: NaiveDate,
    pub updated_at: DateTime<Utc>,
    /// Oldest first.
    pub comments: Vec<CommentView>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostQueryError {
    #[error("database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Newest first, at most `limit` rows.
    async fn list_recent(&self, limit: u64) -> Result<Vec<PostSummary>, PostQueryError>;

    async fn find_by_id(&self, post_id: i32) -> Result<Option<Post>, PostQueryError>;

    async fn find_detail(&self, post_id: i32) -> Result<Option<PostDetail>, PostQueryError>;
}
