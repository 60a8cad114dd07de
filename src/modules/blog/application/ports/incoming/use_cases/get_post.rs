use async_trait::async_trait;

use crate::blog::application::ports::outgoing::PostDetail;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetPostError {
    #[error("post not found")]
    NotFound,

    #[error("query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetPostUseCase: Send + Sync {
    async fn execute(&self, post_id: i32) -> Result<PostDetail, GetPostError>;
}
