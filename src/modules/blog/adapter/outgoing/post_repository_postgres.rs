use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;

use super::sea_orm_entity::{blog_posts, comments};
use crate::blog::application::ports::outgoing::{
    NewPost, PostChanges, PostRepository, PostRepositoryError,
};
use crate::blog::domain::entities::Post;

#[derive(Clone)]
pub struct PostRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_write_error(e: DbErr) -> PostRepositoryError {
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
    {
        return PostRepositoryError::TitleAlreadyExists;
    }
    db_error(e)
}

fn db_error(e: DbErr) -> PostRepositoryError {
    tracing::error!(error = %e, "Post repository failure");
    PostRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostRepositoryPostgres {
    async fn create_post(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let now = Utc::now();

        let model = blog_posts::ActiveModel {
            id: NotSet,
            title: Set(post.title),
            subtitle: Set(post.subtitle),
            body: Set(post.body),
            image_url: Set(post.image_url),
            author_id: Set(post.author_id.value()),
            created_on: Set(now.date_naive()),
            updated_at: Set(now.fixed_offset()),
        };

        let created = model.insert(&*self.db).await.map_err(map_write_error)?;

        tracing::info!(post_id = created.id, "Post created");
        Ok(created.into())
    }

    async fn update_post(
        &self,
        post_id: i32,
        changes: PostChanges,
    ) -> Result<Post, PostRepositoryError> {
        let mut update = blog_posts::Entity::update_many()
            .col_expr(blog_posts::Column::Title, Expr::value(changes.title))
            .col_expr(blog_posts::Column::Subtitle, Expr::value(changes.subtitle))
            .col_expr(blog_posts::Column::Body, Expr::value(changes.body))
            .col_expr(
                blog_posts::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            );

        if let Some(image_url) = changes.image_url {
            update = update.col_expr(blog_posts::Column::ImageUrl, Expr::value(image_url));
        }

        let updated = update
            .filter(blog_posts::Column::Id.eq(post_id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_error)?;

        updated
            .into_iter()
            .next()
            .map(Post::from)
            .ok_or(PostRepositoryError::NotFound)
    }

    async fn delete_post(&self, post_id: i32) -> Result<(), PostRepositoryError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let removed_comments = comments::Entity::delete_many()
            .filter(comments::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let removed = blog_posts::Entity::delete_by_id(post_id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        if removed.rows_affected == 0 {
            txn.rollback().await.map_err(db_error)?;
            return Err(PostRepositoryError::NotFound);
        }

        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            post_id,
            comments = removed_comments.rows_affected,
            "Post deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(id: i32, title: &str, image_url: &str) -> blog_posts::Model {
        blog_posts::Model {
            id,
            title: title.to_string(),
            subtitle: "Sub".to_string(),
            body: "Body".to_string(),
            image_url: image_url.to_string(),
            author_id: 1,
            created_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn new_post() -> NewPost {
        NewPost {
            title: "Hello".to_string(),
            subtitle: "Sub".to_string(),
            body: "Body".to_string(),
            image_url: "https://img.example/p.png".to_string(),
            author_id: UserId::from(1),
        }
    }

    fn changes(image_url: Option<&str>) -> PostChanges {
        PostChanges {
            title: "Renamed".to_string(),
            subtitle: "Sub".to_string(),
            body: "Body".to_string(),
            image_url: image_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_post_returns_stored_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(4, "Hello", "https://img.example/p.png")]])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        let post = repo.create_post(new_post()).await.unwrap();

        assert_eq!(post.id, 4);
        assert_eq!(post.author_id, UserId::from(1));
    }

    #[tokio::test]
    async fn create_post_duplicate_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"blog_posts_title_key\""
                    .to_string(),
            )])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        let result = repo.create_post(new_post()).await;

        assert_eq!(result.unwrap_err(), PostRepositoryError::TitleAlreadyExists);
    }

    #[tokio::test]
    async fn update_post_returns_updated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(4, "Renamed", "https://img.example/new.png")]])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        let post = repo
            .update_post(4, changes(Some("https://img.example/new.png")))
            .await
            .unwrap();

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.image_url, "https://img.example/new.png");
    }

    #[tokio::test]
    async fn update_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<blog_posts::Model>::new()])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        let result = repo.update_post(99, changes(None)).await;

        assert_eq!(result.unwrap_err(), PostRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn delete_post_removes_post_and_comments() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2), exec(1)])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        assert!(repo.delete_post(4).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0), exec(0)])
            .into_connection();
        let repo = PostRepositoryPostgres::new(Arc::new(db));

        let result = repo.delete_post(99).await;

        assert_eq!(result.unwrap_err(), PostRepositoryError::NotFound);
    }
}
