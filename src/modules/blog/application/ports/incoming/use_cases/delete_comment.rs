use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone)]
pub enum DeleteCommentError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl fmt::Display for DeleteCommentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteCommentError::NotFound => write!(f, "comment not found"),
            DeleteCommentError::Forbidden => {
                write!(f, "only the comment author or the administrator can delete it")
            }
            DeleteCommentError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait DeleteCommentUseCase: Send + Sync {
    /// `post_id` must be the post the comment belongs to.
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        comment_id: i32,
    ) -> Result<(), DeleteCommentError>;
}
