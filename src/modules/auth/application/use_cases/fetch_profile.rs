use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::application::domain::entities::{Role, User, UserBio, UserId};
use crate::auth::application::ports::outgoing::UserQuery;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub role: Role,
    pub is_confirmed: bool,
    pub bio: Option<UserBio>,
}

impl ProfileView {
    pub fn from_user(user: User, bio: Option<UserBio>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
            role: user.role,
            is_confirmed: user.is_confirmed,
            bio,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchProfileError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IFetchProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<ProfileView, FetchProfileError>;
}

#[derive(Clone)]
pub struct FetchProfileUseCase {
    query: Arc<dyn UserQuery + Send + Sync>,
}

impl FetchProfileUseCase {
    pub fn new(query: Arc<dyn UserQuery + Send + Sync>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl IFetchProfileUseCase for FetchProfileUseCase {
    async fn execute(&self, user_id: UserId) -> Result<ProfileView, FetchProfileError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchProfileError::QueryError(e.to_string()))?
            .ok_or(FetchProfileError::UserNotFound)?;

        let bio = self
            .query
            .find_bio(user_id)
            .await
            .map_err(|e| FetchProfileError::QueryError(e.to_string()))?;

        Ok(ProfileView::from_user(user, bio))
    }
}
