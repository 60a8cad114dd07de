use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::auth::application::use_cases::create_user::validate_email;
use crate::email::application::ports::outgoing::{EmailMessage, EmailSender};

const MAX_MESSAGE_LEN: usize = 5000;

static PHONE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().\-]{4,24}$").expect("valid phone regex")
});

// ====== Request ======
/// Visitor message posted from the contact form.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    name: String,
    email: String,
    phone: String,
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRequestError {
    EmptyName,
    EmptyEmail,
    InvalidEmailFormat,
    EmptyPhone,
    InvalidPhoneFormat,
    EmptyMessage,
    MessageTooLong,
}

impl std::fmt::Display for ContactRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactRequestError::EmptyName => write!(f, "Name is required"),
            ContactRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            ContactRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            ContactRequestError::EmptyPhone => write!(f, "Phone number is required"),
            ContactRequestError::InvalidPhoneFormat => write!(f, "Invalid phone number"),
            ContactRequestError::EmptyMessage => write!(f, "Message is required"),
            ContactRequestError::MessageTooLong => {
                write!(f, "Message cannot exceed {} characters", MAX_MESSAGE_LEN)
            }
        }
    }
}

impl std::error::Error for ContactRequestError {}

impl ContactRequest {
    pub fn new(
        name: String,
        email: String,
        phone: String,
        message: String,
    ) -> Result<Self, ContactRequestError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactRequestError::EmptyName);
        }

        if email.trim().is_empty() {
            return Err(ContactRequestError::EmptyEmail);
        }
        let email =
            validate_email(&email).map_err(|_| ContactRequestError::InvalidEmailFormat)?;

        let phone = phone.trim();
        if phone.is_empty() {
            return Err(ContactRequestError::EmptyPhone);
        }
        if !PHONE_FORMAT.is_match(phone) {
            return Err(ContactRequestError::InvalidPhoneFormat);
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(ContactRequestError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ContactRequestError::MessageTooLong);
        }

        Ok(Self {
            name: name.to_string(),
            email,
            phone: phone.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<'de> Deserialize<'de> for ContactRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            name: String,
            email: String,
            phone: String,
            message: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        ContactRequest::new(helper.name, helper.email, helper.phone, helper.message)
            .map_err(serde::de::Error::custom)
    }
}

// ====== Error ======
#[derive(Debug, Clone, thiserror::Error)]
pub enum SendContactMessageError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

// ====== Use case ======
#[async_trait]
pub trait ISendContactMessageUseCase: Send + Sync {
    async fn execute(&self, request: ContactRequest) -> Result<(), SendContactMessageError>;
}

#[derive(Clone)]
pub struct SendContactMessageUseCase {
    sender: Arc<dyn EmailSender + Send + Sync>,
    site_owner_email: String,
}

impl SendContactMessageUseCase {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, site_owner_email: &str) -> Self {
        Self {
            sender,
            site_owner_email: site_owner_email.to_string(),
        }
    }
}

pub(crate) fn contact_message(to: &str, request: &ContactRequest) -> EmailMessage {
    EmailMessage::new(
        to,
        format!("{} wants to contact you", request.name()),
        format!(
            "You've got this message: {} \nSent from {}\nPhone: {}",
            request.message(),
            request.email(),
            request.phone()
        ),
    )
    .with_reply_to(request.email())
}

#[async_trait]
impl ISendContactMessageUseCase for SendContactMessageUseCase {
    async fn execute(&self, request: ContactRequest) -> Result<(), SendContactMessageError> {
        self.sender
            .send_email(contact_message(&self.site_owner_email, &request))
            .await
            .map_err(|e| {
                tracing::error!(from = %request.email(), error = %e, "Contact message delivery failed");
                SendContactMessageError::EmailSendingFailed(e.to_string())
            })?;

        tracing::info!(from = %request.email(), "Contact message sent");
        Ok(())
    }
}
