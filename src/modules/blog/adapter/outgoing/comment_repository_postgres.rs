use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;

use super::sea_orm_entity::comments;
use crate::blog::application::ports::outgoing::{
    CommentRepository, CommentRepositoryError, NewComment,
};
use crate::blog::domain::entities::Comment;

#[derive(Clone)]
pub struct CommentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CommentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> CommentRepositoryError {
    tracing::error!(error = %e, "Comment repository failure");
    CommentRepositoryError::DatabaseError(e.to_string())
}

/// The only foreign key a reader can get wrong is the post.
fn map_insert_error(e: DbErr) -> CommentRepositoryError {
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("23503") || err_str.contains("foreign key") {
        return CommentRepositoryError::PostNotFound;
    }
    db_error(e)
}

#[async_trait]
impl CommentRepository for CommentRepositoryPostgres {
    async fn add_comment(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError> {
        let model = comments::ActiveModel {
            id: NotSet,
            body: Set(comment.body),
            author_id: Set(comment.author_id.value()),
            post_id: Set(comment.post_id),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let created = model.insert(&*self.db).await.map_err(map_insert_error)?;

        tracing::info!(
            comment_id = created.id,
            post_id = created.post_id,
            "Comment added"
        );
        Ok(created.into())
    }

    async fn find_by_id(&self, comment_id: i32) -> Result<Option<Comment>, CommentRepositoryError> {
        let model = comments::Entity::find_by_id(comment_id)
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Comment::from))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<(), CommentRepositoryError> {
        let result = comments::Entity::delete_by_id(comment_id)
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(CommentRepositoryError::NotFound);
        }

        tracing::info!(comment_id, "Comment deleted");
        Ok(())
    }
}
