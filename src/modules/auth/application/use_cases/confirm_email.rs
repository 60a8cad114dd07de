use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::services::{TokenService, TokenServiceError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfirmEmailError {
    #[error("Invalid or expired confirmation link")]
    TokenNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone)]
pub struct ConfirmEmailOutput {
    pub user_id: UserId,
    pub email: String,
}

#[async_trait]
pub trait IConfirmEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<ConfirmEmailOutput, ConfirmEmailError>;
}

#[derive(Clone)]
pub struct ConfirmEmailUseCase {
    token_service: TokenService,
}

impl ConfirmEmailUseCase {
    pub fn new(token_service: TokenService) -> Self {
        Self { token_service }
    }
}

#[async_trait]
impl IConfirmEmailUseCase for ConfirmEmailUseCase {
    async fn execute(&self, token: &str) -> Result<ConfirmEmailOutput, ConfirmEmailError> {
        match self.token_service.redeem_for_confirmation(token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Email confirmed");
                Ok(ConfirmEmailOutput {
                    user_id: user.id,
                    email: user.email,
                })
            }
            Err(TokenServiceError::NotFound) => {
                tracing::warn!("Confirmation attempted with unknown or expired token");
                Err(ConfirmEmailError::TokenNotFound)
            }
            Err(TokenServiceError::RepositoryError(e)) => {
                Err(ConfirmEmailError::RepositoryError(e))
            }
        }
    }
}
