use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blog::application::ports::incoming::use_cases::PostInput;
use crate::blog::domain::entities::{Comment, Post};
use crate::media::application::domain::entities::ImageUpload;

//
// ──────────────────────────────────────────────────────────
// Requests
// ──────────────────────────────────────────────────────────
//

/// Image sent inline with a form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageUploadDto {
    #[schema(example = "cover.png")]
    pub file_name: String,

    /// Base64 payload, optionally as a `data:` URI.
    #[schema(example = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==")]
    pub data: String,
}

impl ImageUploadDto {
    pub fn into_upload(self) -> Result<ImageUpload, String> {
        ImageUpload::from_base64(&self.file_name, &self.data).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequestDto {
    #[schema(example = "Why I write Rust")]
    pub title: String,

    #[schema(example = "A few notes after a year")]
    pub subtitle: String,

    /// HTML produced by the rich text editor.
    #[schema(example = "<p>It started with a borrow checker error...</p>")]
    pub body: String,

    pub image: Option<ImageUploadDto>,
}

impl PostRequestDto {
    /// Validates the form into a [`PostInput`], reporting the first broken rule.
    pub fn into_input(self) -> Result<PostInput, String> {
        let image = self.image.map(ImageUploadDto::into_upload).transpose()?;
        PostInput::new(&self.title, &self.subtitle, &self.body, image).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequestDto {
    #[schema(example = "Great read, thanks!")]
    pub body: String,
}

//
// ──────────────────────────────────────────────────────────
// Responses
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub author_id: i32,
    pub created_on: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            subtitle: post.subtitle,
            body: post.body,
            image_url: post.image_url,
            author_id: post.author_id.value(),
            created_on: post.created_on,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            author_id: comment.author_id.value(),
            post_id: comment.post_id,
            created_at: comment.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn dto(body: &str, image: Option<ImageUploadDto>) -> PostRequestDto {
        PostRequestDto {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            body: body.to_string(),
            image,
        }
    }

    #[test]
    fn blank_body_is_rejected() {
        let err = dto("   ", None).into_input().unwrap_err();
        assert_eq!(err, "Post content is required.");
    }

    #[test]
    fn non_image_upload_is_rejected() {
        let image = ImageUploadDto {
            file_name: "notes.txt".to_string(),
            data: STANDARD.encode(b"hello"),
        };

        let err = dto("<p>x</p>", Some(image)).into_input().unwrap_err();
        assert_eq!(err, "Invalid file format. Please upload an image.");
    }

    #[test]
    fn valid_form_keeps_image() {
        let image = ImageUploadDto {
            file_name: "cover.png".to_string(),
            data: STANDARD.encode([1u8, 2, 3]),
        };

        let input = dto("<p>x</p>", Some(image)).into_input().unwrap();
        assert_eq!(input.image().unwrap().file_name(), "cover.png");
        assert_eq!(input.draft().title(), "Title");
    }
}
