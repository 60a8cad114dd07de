use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::blog::application::ports::outgoing::PostSummary;

/// Posts on the first page.
pub const DEFAULT_POSTS_LIMIT: u64 = 3;
/// How many more posts each "more posts" step reveals.
pub const POSTS_PAGE_STEP: u64 = 3;
pub const MAX_POSTS_LIMIT: u64 = 99;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub limit: u64,
    pub has_more: bool,
    /// Limit to request for the next step, absent when nothing is left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_limit: Option<u64>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListPostsError {
    #[error("query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ListPostsUseCase: Send + Sync {
    async fn execute(&self, limit: Option<u64>) -> Result<PostPage, ListPostsError>;
}
