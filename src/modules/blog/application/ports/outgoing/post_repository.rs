// src/modules/blog/application/ports/outgoing/post_repository.rs

use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::UserId;
use crate::blog::domain::entities::Post;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub author_id: UserId,
}

/// Full replacement of the editable fields. `image_url: None` keeps the
/// current image.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRepositoryError {
    NotFound,
    TitleAlreadyExists,
    DatabaseError(String),
}

impl fmt::Display for PostRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostRepositoryError::NotFound => write!(f, "post not found"),
            PostRepositoryError::TitleAlreadyExists => write!(f, "title already exists"),
            PostRepositoryError::DatabaseError(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for PostRepositoryError {}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post, PostRepositoryError>;

    async fn update_post(
        &self,
        post_id: i32,
        changes: PostChanges,
    ) -> Result<Post, PostRepositoryError>;

    /// Removes the post and all of its comments in one transaction.
    async fn delete_post(&self, post_id: i32) -> Result<(), PostRepositoryError>;
}
