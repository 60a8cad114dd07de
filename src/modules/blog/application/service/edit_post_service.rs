use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::Actor;
use crate::blog::application::ports::incoming::use_cases::{
    EditPostError, EditPostUseCase, PostInput,
};
use crate::blog::application::ports::outgoing::{
    PostChanges, PostQuery, PostQueryError, PostRepository, PostRepositoryError,
};
use crate::blog::domain::entities::Post;
use crate::blog::domain::policies::can_mutate_post;
use crate::media::application::ports::outgoing::ImageHost;

pub struct EditPostService<Q, R>
where
    Q: PostQuery,
    R: PostRepository,
{
    post_query: Q,
    post_repository: R,
    image_host: Arc<dyn ImageHost + Send + Sync>,
}

impl<Q, R> EditPostService<Q, R>
where
    Q: PostQuery,
    R: PostRepository,
{
    pub fn new(post_query: Q, post_repository: R, image_host: Arc<dyn ImageHost + Send + Sync>) -> Self {
        Self {
            post_query,
            post_repository,
            image_host,
        }
    }
}

#[async_trait]
impl<Q, R> EditPostUseCase for EditPostService<Q, R>
where
    Q: PostQuery + Send + Sync,
    R: PostRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        input: PostInput,
    ) -> Result<Post, EditPostError> {
        let post = self
            .post_query
            .find_by_id(post_id)
            .await
            .map_err(|PostQueryError::DatabaseError(msg)| EditPostError::RepositoryError(msg))?
            .ok_or(EditPostError::NotFound)?;

        if !can_mutate_post(&actor, &post) {
            tracing::warn!(user_id = %actor.id, post_id, "Post edit refused");
            return Err(EditPostError::Forbidden);
        }

        let image_url = match input.image() {
            Some(image) => Some(
                self.image_host
                    .upload(image.clone(), None)
                    .await
                    .map_err(|e| EditPostError::ImageUploadFailed(e.to_string()))?,
            ),
            None => None,
        };

        let draft = input.draft();
        self.post_repository
            .update_post(
                post_id,
                PostChanges {
                    title: draft.title().to_string(),
                    subtitle: draft.subtitle().to_string(),
                    body: draft.body().to_string(),
                    image_url,
                },
            )
            .await
            .map_err(|e| match e {
                PostRepositoryError::NotFound => EditPostError::NotFound,
                PostRepositoryError::TitleAlreadyExists => EditPostError::TitleAlreadyExists,
                PostRepositoryError::DatabaseError(msg) => EditPostError::RepositoryError(msg),
            })
    }
}
