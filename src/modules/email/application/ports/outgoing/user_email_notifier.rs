#[derive(Debug, Clone, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Account mails carrying single-use tokens.
#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_confirmation_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}
