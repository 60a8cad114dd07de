// src/modules/blog/application/ports/outgoing/comment_repository.rs

use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::UserId;
use crate::blog::domain::entities::Comment;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i32,
    pub author_id: UserId,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentRepositoryError {
    PostNotFound,
    NotFound,
    DatabaseError(String),
}

impl fmt::Display for CommentRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentRepositoryError::PostNotFound => write!(f, "post not found"),
            CommentRepositoryError::NotFound => write!(f, "comment not found"),
            CommentRepositoryError::DatabaseError(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for CommentRepositoryError {}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError>;

    async fn find_by_id(&self, comment_id: i32) -> Result<Option<Comment>, CommentRepositoryError>;

    async fn delete_comment(&self, comment_id: i32) -> Result<(), CommentRepositoryError>;
}
