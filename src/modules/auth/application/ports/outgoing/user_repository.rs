use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::auth::application::domain::entities::{AccountToken, Role, User, UserBio, UserId};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub role: Role,
    /// Confirmation token written together with the account.
    pub token: AccountToken,
}

/// Fields of an account a user may change on their own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Replaces the stored bio when present.
    pub bio: Option<UserBio>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Replaces whatever token the account held.
    async fn store_token(
        &self,
        user_id: UserId,
        token: AccountToken,
    ) -> Result<(), UserRepositoryError>;

    /// Atomically confirms the account holding `token` and clears the token.
    /// Returns `None` when no live token matched; two concurrent callers can
    /// never both get `Some`.
    async fn confirm_with_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Atomically replaces the password hash and clears the token, only if the
    /// account still holds `token`. Returns whether the update happened.
    async fn reset_password_with_token(
        &self,
        user_id: UserId,
        token: &str,
        issued_after: DateTime<Utc>,
        password_hash: String,
    ) -> Result<bool, UserRepositoryError>;

    /// Applies account changes and the bio upsert as one unit. The returned
    /// bio is the stored one when `changes.bio` was given, `None` otherwise.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<(User, Option<UserBio>), UserRepositoryError>;
}

#[derive(Debug, Clone)]
pub enum UserRepositoryError {
    UserAlreadyExists,
    AdministratorAlreadyExists,
    UserNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::UserNotFound => write!(f, "User not found"),
            UserRepositoryError::UserAlreadyExists => write!(f, "User already exists"),
            UserRepositoryError::AdministratorAlreadyExists => {
                write!(f, "An administrator account already exists")
            }
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for UserRepositoryError {}
