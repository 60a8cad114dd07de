use chrono::{DateTime, NaiveDate, Utc};

use crate::auth::application::domain::entities::UserId;

/// Image shown on posts created without an upload.
pub const DEFAULT_POST_IMAGE_URL: &str =
    "https://res.cloudinary.com/dw6opo6zj/image/upload/v1694185393/default_post_image.jpg";

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub author_id: UserId,
    pub created_on: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub body: String,
    pub author_id: UserId,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}
