use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::Actor;
use crate::blog::application::ports::incoming::use_cases::{
    CreatePostError, CreatePostUseCase, PostInput,
};
use crate::blog::application::ports::outgoing::{NewPost, PostRepository, PostRepositoryError};
use crate::blog::domain::entities::{Post, DEFAULT_POST_IMAGE_URL};
use crate::blog::domain::policies::can_create_post;
use crate::media::application::ports::outgoing::ImageHost;

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

pub struct CreatePostService<R>
where
    R: PostRepository,
{
    post_repository: R,
    image_host: Arc<dyn ImageHost + Send + Sync>,
}

impl<R> CreatePostService<R>
where
    R: PostRepository,
{
    pub fn new(post_repository: R, image_host: Arc<dyn ImageHost + Send + Sync>) -> Self {
        Self {
            post_repository,
            image_host,
        }
    }
}

#[async_trait]
impl<R> CreatePostUseCase for CreatePostService<R>
where
    R: PostRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, input: PostInput) -> Result<Post, CreatePostError> {
        if !can_create_post(&actor) {
            tracing::warn!(user_id = %actor.id, "Post creation refused");
            return Err(CreatePostError::Forbidden);
        }

        let image_url = match input.image() {
            Some(image) => self
                .image_host
                .upload(image.clone(), None)
                .await
                .map_err(|e| CreatePostError::ImageUploadFailed(e.to_string()))?,
            None => DEFAULT_POST_IMAGE_URL.to_string(),
        };

        let draft = input.draft();
        self.post_repository
            .create_post(NewPost {
                title: draft.title().to_string(),
                subtitle: draft.subtitle().to_string(),
                body: draft.body().to_string(),
                image_url,
                author_id: actor.id,
            })
            .await
            .map_err(|e| match e {
                PostRepositoryError::TitleAlreadyExists => CreatePostError::TitleAlreadyExists,
                PostRepositoryError::DatabaseError(msg) => CreatePostError::RepositoryError(msg),
                PostRepositoryError::NotFound => CreatePostError::RepositoryError(
                    "unexpected not found while creating post".to_string(),
                ),
            })
    }
}
