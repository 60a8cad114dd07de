// application/ports/outgoing/user_query.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::{User, UserBio, UserId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;

    /// Exact match on the stored address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

    /// Account currently holding `token`, provided it was issued after
    /// `issued_after`.
    async fn find_by_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserQueryError>;

    async fn find_bio(&self, user_id: UserId) -> Result<Option<UserBio>, UserQueryError>;

    async fn administrator_exists(&self) -> Result<bool, UserQueryError>;
}
