use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;

use super::sea_orm_entity::{authors, blog_posts, comments};
use crate::blog::application::ports::outgoing::{
    AuthorView, CommentView, PostDetail, PostQuery, PostQueryError, PostSummary,
};
use crate::blog::domain::entities::Post;

#[derive(Clone)]
pub struct PostQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> PostQueryError {
    tracing::error!(error = %e, "Post query failed");
    PostQueryError::DatabaseError(e.to_string())
}

/// Authors cascade with their posts and comments, so a missing row means the
/// data is inconsistent.
fn require_author(
    author: Option<authors::Model>,
    author_id: i32,
) -> Result<AuthorView, PostQueryError> {
    author.map(AuthorView::from).ok_or_else(|| {
        PostQueryError::DatabaseError(format!("author {} not found", author_id))
    })
}

#[async_trait]
impl PostQuery for PostQueryPostgres {
    async fn list_recent(&self, limit: u64) -> Result<Vec<PostSummary>, PostQueryError> {
        let rows = blog_posts::Entity::find()
            .find_also_related(authors::Entity)
            .order_by_desc(blog_posts::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        rows.into_iter()
            .map(|(post, author)| {
                Ok(PostSummary {
                    author: require_author(author, post.author_id)?,
                    id: post.id,
                    title: post.title,
                    subtitle: post.subtitle,
                    image_url: post.image_url,
                    created_on: post.created_on,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, post_id: i32) -> Result<Option<Post>, PostQueryError> {
        let model = blog_posts::Entity::find_by_id(post_id)
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Post::from))
    }

    async fn find_detail(&self, post_id: i32) -> Result<Option<PostDetail>, PostQueryError> {
        let Some((post, author)) = blog_posts::Entity::find_by_id(post_id)
            .find_also_related(authors::Entity)
            .one(&*self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let comment_rows = comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id))
            .find_also_related(authors::Entity)
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        let comments = comment_rows
            .into_iter()
            .map(|(comment, author)| {
                Ok(CommentView {
                    author: require_author(author, comment.author_id)?,
                    id: comment.id,
                    body: comment.body,
                    created_at: comment.created_at.with_timezone(&chrono::Utc),
                })
            })
            .collect::<Result<Vec<_>, PostQueryError>>()?;

        Ok(Some(PostDetail {
            author: require_author(author, post.author_id)?,
            id: post.id,
            title: post.title,
            subtitle: post.subtitle,
            body: post.body,
            image_url: post.image_url,
            created_on: post.created_on,
            updated_at: post.updated_at.with_timezone(&chrono::Utc),
            comments,
        }))
    }
}
