use std::sync::Arc;

use crate::auth::application::domain::entities::{Role, UserId};
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase, RegisterRequest,
};
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

// ============================================================================
// Registration Output with Message
// ============================================================================
#[derive(Debug, Clone)]
pub struct UserRegistrationOutput {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub message: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            name: output.name,
            email: output.email,
            role: output.role,
            message: "Registration successful. Please check your email to confirm your account."
                .to_string(),
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

// ============================================================================
// User Registration (Orchestration Layer)
// ============================================================================

#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            email_service,
        }
    }

    /// Creates the account, then sends the confirmation mail within the same
    /// request. A mail failure fails the request; the account stays and the
    /// user can ask for the mail again.
    pub async fn register_user(
        &self,
        request: RegisterRequest,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created = self.create_user_use_case.execute(request).await?;

        self.email_service
            .send_confirmation_email(&created.email, &created.name, &created.confirmation_token)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %created.user_id, error = %e, "Confirmation email failed");
                UserRegistrationError::EmailSendingFailed(e.to_string())
            })?;

        Ok(created.into())
    }
}
