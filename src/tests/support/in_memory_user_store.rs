use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::{
    AccountToken, Role, User, UserBio, UserId, DEFAULT_AVATAR_URL,
};
use crate::auth::application::ports::outgoing::{
    NewUser, ProfileChanges, UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};

#[derive(Default)]
struct Inner {
    next_id: i32,
    users: HashMap<i32, User>,
    bios: HashMap<i32, UserBio>,
}

/// Identity store kept in memory, honouring the same uniqueness rules and
/// conditional updates as the Postgres adapters.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, email: &str, password_hash: &str, confirmed: bool, role: Role) -> User {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let user = User {
            id: UserId::from(inner.next_id),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_confirmed: confirmed,
            token: None,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            role,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id.value(), user.clone());
        user
    }

    pub fn set_token(&self, user_id: UserId, value: &str, issued_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.get_mut(&user_id.value()) {
            user.token = Some(AccountToken::new(value.to_string(), issued_at));
        }
    }

    pub fn get(&self, user_id: UserId) -> Option<User> {
        self.inner.lock().unwrap().users.get(&user_id.value()).cloned()
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn set_bio(&self, user_id: UserId, bio: UserBio) {
        self.inner.lock().unwrap().bios.insert(user_id.value(), bio);
    }

    pub fn bio(&self, user_id: UserId) -> Option<UserBio> {
        self.inner.lock().unwrap().bios.get(&user_id.value()).cloned()
    }
}

fn holds_live_token(user: &User, token: &str, issued_after: DateTime<Utc>) -> bool {
    user.token
        .as_ref()
        .map(|t| t.value() == token && t.issued_at() > issued_after)
        .unwrap_or(false)
}

#[async_trait]
impl UserQuery for InMemoryUserStore {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self.get_by_email(email))
    }

    async fn find_by_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserQueryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| holds_live_token(u, token, issued_after))
            .cloned())
    }

    async fn find_bio(&self, user_id: UserId) -> Result<Option<UserBio>, UserQueryError> {
        Ok(self.bio(user_id))
    }

    async fn administrator_exists(&self) -> Result<bool, UserQueryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().any(|u| u.role == Role::Administrator))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        if user.role == Role::Administrator
            && inner.users.values().any(|u| u.role == Role::Administrator)
        {
            return Err(UserRepositoryError::AdministratorAlreadyExists);
        }

        inner.next_id += 1;
        let created = User {
            id: UserId::from(inner.next_id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            is_confirmed: false,
            token: Some(user.token),
            avatar_url: user.avatar_url,
            role: user.role,
            created_at: Utc::now(),
        };
        inner.users.insert(created.id.value(), created.clone());
        Ok(created)
    }

    async fn store_token(
        &self,
        user_id: UserId,
        token: AccountToken,
    ) -> Result<(), UserRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner
            .users
            .get_mut(&user_id.value())
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.token = Some(token);
        Ok(())
    }

    async fn confirm_with_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user) = inner
            .users
            .values_mut()
            .find(|u| holds_live_token(u, token, issued_after))
        else {
            return Ok(None);
        };
        user.is_confirmed = true;
        user.token = None;
        Ok(Some(user.clone()))
    }

    async fn reset_password_with_token(
        &self,
        user_id: UserId,
        token: &str,
        issued_after: DateTime<Utc>,
        password_hash: String,
    ) -> Result<bool, UserRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.get_mut(&user_id.value()) {
            Some(user) if holds_live_token(user, token, issued_after) => {
                user.password_hash = password_hash;
                user.token = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<(User, Option<UserBio>), UserRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(email) = &changes.email {
            if inner
                .users
                .values()
                .any(|u| &u.email == email && u.id != user_id)
            {
                return Err(UserRepositoryError::UserAlreadyExists);
            }
        }

        let user = inner
            .users
            .get_mut(&user_id.value())
            .ok_or(UserRepositoryError::UserNotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(avatar_url) = changes.avatar_url {
            user.avatar_url = avatar_url;
        }
        let user = user.clone();

        if let Some(bio) = &changes.bio {
            inner.bios.insert(user_id.value(), bio.clone());
        }
        Ok((user, changes.bio))
    }
}
