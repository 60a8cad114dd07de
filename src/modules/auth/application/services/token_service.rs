use std::sync::{Arc, LazyLock};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use regex::Regex;

use crate::auth::application::domain::entities::{AccountToken, User};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};

/// Account tokens stay redeemable for 24 hours unless configured otherwise.
pub const DEFAULT_ACCOUNT_TOKEN_TTL_SECS: i64 = 86_400;

const TOKEN_BYTES: usize = 32;
const MAX_TOKEN_LEN: usize = 128;

static TOKEN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid token regex"));

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenServiceError {
    #[error("Token not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Issues and redeems the single-use tokens behind email confirmation and
/// password reset.
#[derive(Clone)]
pub struct TokenService {
    query: Arc<dyn UserQuery + Send + Sync>,
    repository: Arc<dyn UserRepository + Send + Sync>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(
        query: Arc<dyn UserQuery + Send + Sync>,
        repository: Arc<dyn UserRepository + Send + Sync>,
        ttl: Duration,
    ) -> Self {
        Self {
            query,
            repository,
            ttl,
        }
    }

    /// A fresh token stamped now, for callers that persist it themselves.
    pub fn mint(&self) -> AccountToken {
        AccountToken::new(generate_token(), Utc::now())
    }

    /// Stores a fresh token on the user, replacing any previous one.
    pub async fn issue(&self, user: &User) -> Result<String, TokenServiceError> {
        let token = self.mint();
        let value = token.value().to_string();

        self.repository
            .store_token(user.id, token)
            .await
            .map_err(|e| TokenServiceError::RepositoryError(e.to_string()))?;

        tracing::debug!(user_id = %user.id, "Account token issued");
        Ok(value)
    }

    /// Confirms the account holding `token` and consumes the token.
    pub async fn redeem_for_confirmation(&self, token: &str) -> Result<User, TokenServiceError> {
        if !is_well_formed(token) {
            return Err(TokenServiceError::NotFound);
        }

        self.repository
            .confirm_with_token(token, self.cutoff())
            .await
            .map_err(|e| TokenServiceError::RepositoryError(e.to_string()))?
            .ok_or(TokenServiceError::NotFound)
    }

    /// Resolves the account holding `token` without consuming it.
    pub async fn redeem_for_reset(&self, token: &str) -> Result<User, TokenServiceError> {
        if !is_well_formed(token) {
            return Err(TokenServiceError::NotFound);
        }

        self.query
            .find_by_token(token, self.cutoff())
            .await
            .map_err(|e| TokenServiceError::RepositoryError(e.to_string()))?
            .ok_or(TokenServiceError::NotFound)
    }

    /// Stores the new password hash and consumes the token, provided the
    /// account still holds it.
    pub async fn complete_reset(
        &self,
        user: &User,
        token: &str,
        new_password_hash: String,
    ) -> Result<(), TokenServiceError> {
        if !is_well_formed(token) {
            return Err(TokenServiceError::NotFound);
        }

        let updated = self
            .repository
            .reset_password_with_token(user.id, token, self.cutoff(), new_password_hash)
            .await
            .map_err(|e| TokenServiceError::RepositoryError(e.to_string()))?;

        if updated {
            Ok(())
        } else {
            Err(TokenServiceError::NotFound)
        }
    }

    fn cutoff(&self) -> DateTime<Utc> {
        Utc::now() - self.ttl
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn is_well_formed(token: &str) -> bool {
    !token.is_empty() && token.len() <= MAX_TOKEN_LEN && TOKEN_FORMAT.is_match(token)
}
