use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::auth::application::ports::outgoing::UserQuery;
use crate::auth::application::services::TokenService;
use crate::auth::application::use_cases::create_user::{validate_email, RegisterRequestError};
use crate::email::application::ports::outgoing::UserEmailNotifier;

// ====== Request ======
#[derive(Debug, Clone)]
pub struct EmailOnlyRequest {
    email: String,
}

impl EmailOnlyRequest {
    pub fn new(email: String) -> Result<Self, RegisterRequestError> {
        Ok(Self {
            email: validate_email(&email)?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for EmailOnlyRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        EmailOnlyRequest::new(helper.email).map_err(serde::de::Error::custom)
    }
}

// ====== Error ======
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResendConfirmationError {
    #[error("This email address is not registered.")]
    EmailNotRegistered,

    #[error("This email address is already confirmed.")]
    AlreadyConfirmed,

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ====== Use case ======
#[async_trait]
pub trait IResendConfirmationUseCase: Send + Sync {
    async fn execute(&self, request: EmailOnlyRequest) -> Result<(), ResendConfirmationError>;
}

#[derive(Clone)]
pub struct ResendConfirmationUseCase {
    query: Arc<dyn UserQuery + Send + Sync>,
    token_service: TokenService,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl ResendConfirmationUseCase {
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
impl IResendConfirmationUseCase for ResendConfirmationUseCase {
    async fn execute(&self, request: EmailOnlyRequest) -> Result<(), ResendConfirmationError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| ResendConfirmationError::RepositoryError(e.to_string()))?
            .ok_or(ResendConfirmationError::EmailNotRegistered)?;

        if user.is_confirmed {
            return Err(ResendConfirmationError::AlreadyConfirmed);
        }

        let token = self
            .token_service
            .issue(&user)
            .await
            .map_err(|e| ResendConfirmationError::RepositoryError(e.to_string()))?;

        self.notifier
            .send_confirmation_email(&user.email, &user.name, &token)
            .await
            .map_err(|e| ResendConfirmationError::EmailSendingFailed(e.to_string()))
    }
}
