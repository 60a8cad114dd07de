use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::Actor;
use crate::blog::domain::entities::Comment;
use crate::blog::domain::policies::CommentBody;

#[derive(Debug, Clone)]
pub enum AddCommentError {
    PostNotFound,
    RepositoryError(String),
}

impl fmt::Display for AddCommentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddCommentError::PostNotFound => write!(f, "post not found"),
            AddCommentError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait AddCommentUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        body: CommentBody,
    ) -> Result<Comment, AddCommentError>;
}
