use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::email::application::ports::outgoing::{
    EmailMessage, EmailSender, UserEmailNotificationError, UserEmailNotifier,
};

#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    base_url: String,
    token_ttl: Duration,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("base_url", &self.base_url)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl UserEmailService {
    /// `token_ttl` is the lifetime the token service enforces; the mail
    /// quotes it to the recipient.
    pub fn new(
        sender: Arc<dyn EmailSender + Send + Sync>,
        base_url: &str,
        token_ttl: Duration,
    ) -> Self {
        Self {
            sender,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_ttl,
        }
    }

    pub fn confirmation_link(&self, token: &str) -> String {
        format!("{}/confirm_email/{}", self.base_url, token)
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password/{}", self.base_url, token)
    }

    fn validity(&self) -> String {
        let minutes = self.token_ttl.num_minutes();
        match (minutes / 60, minutes % 60) {
            (1, 0) => "1 hour".to_string(),
            (hours, 0) if hours > 1 => format!("{hours} hours"),
            _ if minutes == 1 => "1 minute".to_string(),
            _ => format!("{minutes} minutes"),
        }
    }

    async fn deliver(&self, message: EmailMessage) -> Result<(), UserEmailNotificationError> {
        let to = message.to.clone();
        self.sender.send_email(message).await.map_err(|e| {
            tracing::error!(to = %to, error = %e, "Account email delivery failed");
            UserEmailNotificationError::EmailSendingFailed(e.to_string())
        })
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_confirmation_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let body = format!(
            "Hi {name},\n\n\
             Thanks for signing up. Confirm your email address by opening the link below:\n\n\
             {link}\n\n\
             The link is valid for {validity} and can be used once.",
            link = self.confirmation_link(token),
            validity = self.validity()
        );

        self.deliver(EmailMessage::new(to, "Confirm your email address", body))
            .await
    }

    async fn send_password_reset_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let body = format!(
            "Hi {name},\n\n\
             Someone asked to reset the password of your account. If it was you, open the link below:\n\n\
             {link}\n\n\
             If you didn't ask for this, ignore this message and your password stays the same.",
            link = self.reset_link(token)
        );

        self.deliver(EmailMessage::new(to, "Reset your password", body))
            .await
    }
}
