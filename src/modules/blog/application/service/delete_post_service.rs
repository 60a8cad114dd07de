use async_trait::async_trait;

use crate::auth::application::domain::entities::Actor;
use crate::blog::application::ports::incoming::use_cases::{DeletePostError, DeletePostUseCase};
use crate::blog::application::ports::outgoing::{
    PostQuery, PostQueryError, PostRepository, PostRepositoryError,
};
use crate::blog::domain::policies::can_mutate_post;

pub struct DeletePostService<Q, R>
where
    Q: PostQuery,
    R: PostRepository,
{
    post_query: Q,
    post_repository: R,
}

impl<Q, R> DeletePostService<Q, R>
where
    Q: PostQuery,
    R: PostRepository,
{
    pub fn new(post_query: Q, post_repository: R) -> Self {
        Self {
            post_query,
            post_repository,
        }
    }
}

#[async_trait]
impl<Q, R> DeletePostUseCase for DeletePostService<Q, R>
where
    Q: PostQuery + Send + Sync,
    R: PostRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, post_id: i32) -> Result<(), DeletePostError> {
        let post = self
            .post_query
            .find_by_id(post_id)
            .await
            .map_err(|PostQueryError::DatabaseError(msg)| DeletePostError::RepositoryError(msg))?
            .ok_or(DeletePostError::NotFound)?;

        if !can_mutate_post(&actor, &post) {
            tracing::warn!(user_id = %actor.id, post_id, "Post deletion refused");
            return Err(DeletePostError::Forbidden);
        }

        self.post_repository
            .delete_post(post_id)
            .await
            .map_err(|e| match e {
                PostRepositoryError::NotFound => DeletePostError::NotFound,
                other => DeletePostError::RepositoryError(other.to_string()),
            })
    }
}
