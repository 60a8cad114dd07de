use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::auth::application::domain::entities::Actor;
use crate::blog::domain::entities::Post;
use crate::blog::domain::policies::{PostContentError, PostDraft};
use crate::media::application::domain::entities::ImageUpload;

//
// ──────────────────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────────────────
//

/// Validated post form, shared by create and edit.
#[derive(Debug, Clone)]
pub struct PostInput {
    draft: PostDraft,
    image: Option<ImageUpload>,
}

impl PostInput {
    pub fn new(
        title: &str,
        subtitle: &str,
        body: &str,
        image: Option<ImageUpload>,
    ) -> Result<Self, PostContentError> {
        Ok(Self {
            draft: PostDraft::new(title, subtitle, body)?,
            image,
        })
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }
}

impl<'de> Deserialize<'de> for PostInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PostInputHelper {
            title: String,
            subtitle: String,
            body: String,
            #[serde(default)]
            image: Option<ImageUpload>,
        }

        let helper = PostInputHelper::deserialize(deserializer)?;
        PostInput::new(&helper.title, &helper.subtitle, &helper.body, helper.image)
            .map_err(serde::de::Error::custom)
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum CreatePostError {
    Forbidden,
    TitleAlreadyExists,
    ImageUploadFailed(String),
    RepositoryError(String),
}

impl fmt::Display for CreatePostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatePostError::Forbidden => write!(f, "only the administrator can create posts"),
            CreatePostError::TitleAlreadyExists => {
                write!(f, "a post with this title already exists")
            }
            CreatePostError::ImageUploadFailed(msg) => write!(f, "image upload failed: {}", msg),
            CreatePostError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CreatePostUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, input: PostInput) -> Result<Post, CreatePostError>;
}
