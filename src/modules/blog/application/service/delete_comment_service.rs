use async_trait::async_trait;

use crate::auth::application::domain::entities::Actor;
use crate::blog::application::ports::incoming::use_cases::{
    DeleteCommentError, DeleteCommentUseCase,
};
use crate::blog::application::ports::outgoing::{CommentRepository, CommentRepositoryError};
use crate::blog::domain::policies::can_mutate_comment;

pub struct DeleteCommentService<C>
where
    C: CommentRepository,
{
    comment_repository: C,
}

impl<C> DeleteCommentService<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repository: C) -> Self {
        Self { comment_repository }
    }
}

fn repository_error(e: CommentRepositoryError) -> DeleteCommentError {
    match e {
        CommentRepositoryError::NotFound | CommentRepositoryError::PostNotFound => {
            DeleteCommentError::NotFound
        }
        CommentRepositoryError::DatabaseError(msg) => DeleteCommentError::RepositoryError(msg),
    }
}

#[async_trait]
impl<C> DeleteCommentUseCase for DeleteCommentService<C>
where
    C: CommentRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        comment_id: i32,
    ) -> Result<(), DeleteCommentError> {
        let comment = self
            .comment_repository
            .find_by_id(comment_id)
            .await
            .map_err(repository_error)?
            .filter(|c| c.post_id == post_id)
            .ok_or(DeleteCommentError::NotFound)?;

        if !can_mutate_comment(&actor, &comment) {
            tracing::warn!(user_id = %actor.id, comment_id, "Comment deletion refused");
            return Err(DeleteCommentError::Forbidden);
        }

        self.comment_repository
            .delete_comment(comment_id)
            .await
            .map_err(repository_error)
    }
}
