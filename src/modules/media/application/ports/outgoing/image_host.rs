use async_trait::async_trait;

use crate::media::application::domain::entities::{ImageTransform, ImageUpload};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageHostError {
    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Unexpected image host response: {0}")]
    InvalidResponse(String),
}

/// Stores an image and hands back its durable public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(
        &self,
        image: ImageUpload,
        transform: Option<ImageTransform>,
    ) -> Result<String, ImageHostError>;
}
