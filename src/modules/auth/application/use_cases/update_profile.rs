use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::domain::entities::{UserBio, UserId};
use crate::auth::application::ports::outgoing::{
    ProfileChanges, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::use_cases::create_user::{
    validate_email, validate_name, RegisterRequestError,
};
use crate::auth::application::use_cases::fetch_profile::ProfileView;
use crate::media::application::domain::entities::{ImageTransform, ImageUpload};
use crate::media::application::ports::outgoing::ImageHost;

const MAX_ABOUT_LEN: usize = 2000;
const MAX_BIO_FIELD_LEN: usize = 250;

// ====== Request ======
#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    name: String,
    email: String,
    image: Option<ImageUpload>,
    bio: Option<UserBio>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateProfileRequestError {
    Account(RegisterRequestError),
    BioFieldTooLong(&'static str),
}

impl std::fmt::Display for UpdateProfileRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateProfileRequestError::Account(e) => write!(f, "{}", e),
            UpdateProfileRequestError::BioFieldTooLong(field) => {
                write!(f, "Bio field '{}' is too long", field)
            }
        }
    }
}

impl std::error::Error for UpdateProfileRequestError {}

impl From<RegisterRequestError> for UpdateProfileRequestError {
    fn from(e: RegisterRequestError) -> Self {
        UpdateProfileRequestError::Account(e)
    }
}

impl UpdateProfileRequest {
    pub fn new(
        name: String,
        email: String,
        image: Option<ImageUpload>,
        bio: Option<UserBio>,
    ) -> Result<Self, UpdateProfileRequestError> {
        let name = validate_name(&name)?;
        let email = validate_email(&email)?;
        let bio = bio.map(normalize_bio).transpose()?;

        Ok(Self {
            name,
            email,
            image,
            bio,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn bio(&self) -> Option<&UserBio> {
        self.bio.as_ref()
    }
}

/// Trims every field and drops blank ones.
fn normalize_bio(bio: UserBio) -> Result<UserBio, UpdateProfileRequestError> {
    fn field(
        value: Option<String>,
        name: &'static str,
        max: usize,
    ) -> Result<Option<String>, UpdateProfileRequestError> {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) if v.chars().count() > max => {
                Err(UpdateProfileRequestError::BioFieldTooLong(name))
            }
            other => Ok(other),
        }
    }

    Ok(UserBio {
        genre: field(bio.genre, "genre", MAX_BIO_FIELD_LEN)?,
        about: field(bio.about, "about", MAX_ABOUT_LEN)?,
        profession: field(bio.profession, "profession", MAX_BIO_FIELD_LEN)?,
        linkedin: field(bio.linkedin, "linkedin", MAX_BIO_FIELD_LEN)?,
        twitter: field(bio.twitter, "twitter", MAX_BIO_FIELD_LEN)?,
        facebook: field(bio.facebook, "facebook", MAX_BIO_FIELD_LEN)?,
    })
}

// ====== Error ======
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("User not found")]
    UserNotFound,

    #[error("This email address is already used by another account.")]
    EmailAlreadyExists,

    #[error("Avatar upload failed: {0}")]
    ImageUploadFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<UserRepositoryError> for UpdateProfileError {
    fn from(e: UserRepositoryError) -> Self {
        match e {
            UserRepositoryError::UserNotFound => UpdateProfileError::UserNotFound,
            UserRepositoryError::UserAlreadyExists => UpdateProfileError::EmailAlreadyExists,
            other => UpdateProfileError::RepositoryError(other.to_string()),
        }
    }
}

// ====== Use case ======
#[async_trait]
pub trait IUpdateProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> Result<ProfileView, UpdateProfileError>;
}

#[derive(Clone)]
pub struct UpdateProfileUseCase {
    query: Arc<dyn UserQuery + Send + Sync>,
    repository: Arc<dyn UserRepository + Send + Sync>,
    image_host: Arc<dyn ImageHost + Send + Sync>,
}

impl UpdateProfileUseCase {
    pub fn new(
        query: Arc<dyn UserQuery + Send + Sync>,
        repository: Arc<dyn UserRepository + Send + Sync>,
        image_host: Arc<dyn ImageHost + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            image_host,
        }
    }
}

#[async_trait]
impl IUpdateProfileUseCase for UpdateProfileUseCase {
    async fn execute(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> Result<ProfileView, UpdateProfileError> {
        let current = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?
            .ok_or(UpdateProfileError::UserNotFound)?;

        if request.email() != current.email {
            let taken = self
                .query
                .find_by_email(request.email())
                .await
                .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?
                .is_some_and(|other| other.id != user_id);
            if taken {
                return Err(UpdateProfileError::EmailAlreadyExists);
            }
        }

        let avatar_url = match request.image() {
            Some(image) => Some(
                self.image_host
                    .upload(image.clone(), Some(ImageTransform::avatar()))
                    .await
                    .map_err(|e| UpdateProfileError::ImageUploadFailed(e.to_string()))?,
            ),
            None => None,
        };

        let (user, saved_bio) = self
            .repository
            .update_profile(
                user_id,
                ProfileChanges {
                    name: Some(request.name().to_string()),
                    email: Some(request.email().to_string()),
                    avatar_url,
                    bio: request.bio().cloned(),
                },
            )
            .await?;

        let bio = match saved_bio {
            Some(bio) => Some(bio),
            None => self
                .query
                .find_bio(user_id)
                .await
                .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?,
        };

        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(ProfileView::from_user(user, bio))
    }
}
