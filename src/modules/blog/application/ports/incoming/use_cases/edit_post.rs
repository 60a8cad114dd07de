use async_trait::async_trait;
use std::fmt;

use super::create_post::PostInput;
use crate::auth::application::domain::entities::Actor;
use crate::blog::domain::entities::Post;

#[derive(Debug, Clone)]
pub enum EditPostError {
    NotFound,
    Forbidden,
    TitleAlreadyExists,
    ImageUploadFailed(String),
    RepositoryError(String),
}

impl fmt::Display for EditPostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditPostError::NotFound => write!(f, "post not found"),
            EditPostError::Forbidden => write!(f, "only the administrator can edit posts"),
            EditPostError::TitleAlreadyExists => {
                write!(f, "a post with this title already exists")
            }
            EditPostError::ImageUploadFailed(msg) => write!(f, "image upload failed: {}", msg),
            EditPostError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait EditPostUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        input: PostInput,
    ) -> Result<Post, EditPostError>;
}
