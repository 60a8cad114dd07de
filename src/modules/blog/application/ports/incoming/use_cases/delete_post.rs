use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone)]
pub enum DeletePostError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl fmt::Display for DeletePostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePostError::NotFound => write!(f, "post not found"),
            DeletePostError::Forbidden => write!(f, "only the administrator can delete posts"),
            DeletePostError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait DeletePostUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, post_id: i32) -> Result<(), DeletePostError>;
}
