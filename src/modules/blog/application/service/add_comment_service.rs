use async_trait::async_trait;

use crate::auth::application::domain::entities::Actor;
use crate::blog::application::ports::incoming::use_cases::{AddCommentError, AddCommentUseCase};
use crate::blog::application::ports::outgoing::{
    CommentRepository, CommentRepositoryError, NewComment,
};
use crate::blog::domain::entities::Comment;
use crate::blog::domain::policies::CommentBody;

pub struct AddCommentService<C>
where
    C: CommentRepository,
{
    comment_repository: C,
}

impl<C> AddCommentService<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repository: C) -> Self {
        Self { comment_repository }
    }
}

#[async_trait]
impl<C> AddCommentUseCase for AddCommentService<C>
where
    C: CommentRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        post_id: i32,
        body: CommentBody,
    ) -> Result<Comment, AddCommentError> {
        self.comment_repository
            .add_comment(NewComment {
                post_id,
                author_id: actor.id,
                body: body.into_inner(),
            })
            .await
            .map_err(|e| match e {
                CommentRepositoryError::PostNotFound => AddCommentError::PostNotFound,
                other => AddCommentError::RepositoryError(other.to_string()),
            })
    }
}
