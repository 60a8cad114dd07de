use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::auth::application::services::{TokenService, TokenServiceError};
use crate::auth::application::use_cases::create_user::RegisterRequestError;

// ====== Request ======
/// New password with its confirmation, as posted to the reset form.
#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    password: String,
}

impl ResetPasswordRequest {
    pub fn new(password: String, confirm_password: String) -> Result<Self, RegisterRequestError> {
        if password.is_empty() {
            return Err(RegisterRequestError::EmptyPassword);
        }
        if password != confirm_password {
            return Err(RegisterRequestError::PasswordMismatch);
        }
        Ok(Self { password })
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Reset form as posted. The passwords are validated only once the token
/// has resolved to an account.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

// ====== Output ======
#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenInfo {
    pub email: String,
}

// ====== Error ======
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset link")]
    TokenNotFound,

    #[error("{0}")]
    InvalidPassword(RegisterRequestError),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<TokenServiceError> for ResetPasswordError {
    fn from(error: TokenServiceError) -> Self {
        match error {
            TokenServiceError::NotFound => ResetPasswordError::TokenNotFound,
            TokenServiceError::RepositoryError(msg) => ResetPasswordError::RepositoryError(msg),
        }
    }
}

// ====== Use case ======
#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    /// Resolves a reset token without consuming it.
    async fn check_token(&self, token: &str) -> Result<ResetTokenInfo, ResetPasswordError>;

    async fn execute(&self, command: ResetPasswordCommand) -> Result<(), ResetPasswordError>;
}

#[derive(Clone)]
pub struct ResetPasswordUseCase {
    token_service: TokenService,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl ResetPasswordUseCase {
    pub fn new(
        token_service: TokenService,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            token_service,
            password_hasher,
        }
    }
}

#[async_trait]
impl IResetPasswordUseCase for ResetPasswordUseCase {
    async fn check_token(&self, token: &str) -> Result<ResetTokenInfo, ResetPasswordError> {
        let user = self.token_service.redeem_for_reset(token).await?;
        Ok(ResetTokenInfo { email: user.email })
    }

    async fn execute(&self, command: ResetPasswordCommand) -> Result<(), ResetPasswordError> {
        let user = self.token_service.redeem_for_reset(&command.token).await?;

        let request = ResetPasswordRequest::new(command.password, command.confirm_password)
            .map_err(ResetPasswordError::InvalidPassword)?;

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.token_service
            .complete_reset(&user, &command.token, password_hash)
            .await
            .inspect_err(|_| {
                tracing::warn!(user_id = %user.id, "Reset token consumed before completion");
            })?;

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}
