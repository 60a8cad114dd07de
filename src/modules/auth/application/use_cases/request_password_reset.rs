use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::auth::application::services::TokenService;
use crate::auth::application::use_cases::resend_confirmation::EmailOnlyRequest;
use crate::email::application::ports::outgoing::UserEmailNotifier;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("This email address is not registered.")]
    EmailNotRegistered,

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(&self, request: EmailOnlyRequest) -> Result<(), RequestPasswordResetError>;
}

#[derive(Clone)]
pub struct RequestPasswordResetUseCase {
    query: Arc<dyn UserQuery + Send + Sync>,
    token_service: TokenService,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl RequestPasswordResetUseCase {
    pub fn new(
        query: Arc<dyn UserQuery + Send + Sync>,
        token_service: TokenService,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            query,
            token_service,
            notifier,
        }
    }
}

#[async_trait]
impl IRequestPasswordResetUseCase for RequestPasswordResetUseCase {
    async fn execute(&self, request: EmailOnlyRequest) -> Result<(), RequestPasswordResetError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?
            .ok_or(RequestPasswordResetError::EmailNotRegistered)?;

        let token = self
            .token_service
            .issue(&user)
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;

        self.notifier
            .send_password_reset_email(&user.email, &user.name, &token)
            .await
            .map_err(|e| RequestPasswordResetError::EmailSendingFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }
}
