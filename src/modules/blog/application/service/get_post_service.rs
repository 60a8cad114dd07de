use async_trait::async_trait;

use crate::blog::application::ports::incoming::use_cases::{GetPostError, GetPostUseCase};
use crate::blog::application::ports::outgoing::{PostDetail, PostQuery, PostQueryError};

pub struct GetPostService<Q>
where
    Q: PostQuery,
{
    query: Q,
}

impl<Q> GetPostService<Q>
where
    Q: PostQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetPostUseCase for GetPostService<Q>
where
    Q: PostQuery + Send + Sync,
{
    async fn execute(&self, post_id: i32) -> Result<PostDetail, GetPostError> {
        self.query
            .find_detail(post_id)
            .await
            .map_err(|PostQueryError::DatabaseError(msg)| GetPostError::QueryError(msg))?
            .ok_or(GetPostError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::blog::application::ports::outgoing::{CommentRepository, NewComment};
    use crate::tests::support::in_memory_blog_store::InMemoryBlogStore;

    #[tokio::test]
    async fn returns_post_with_comments_oldest_first() {
        let store = InMemoryBlogStore::new();
        store.add_author(1, "Admin");
        store.add_author(2, "Reader");
        let post = store.seed_post("Hello", 1);
        for body in ["first", "second"] {
            store
                .add_comment(NewComment {
                    post_id: post.id,
                    author_id: UserId::from(2),
                    body: body.to_string(),
                })
                .await
                .unwrap();
        }

        let detail = GetPostService::new(store).execute(post.id).await.unwrap();

        assert_eq!(detail.title, "Hello");
        assert_eq!(detail.author.name, "Admin");
        let bodies: Vec<_> = detail.comments.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
        assert_eq!(detail.comments[0].author.name, "Reader");
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let result = GetPostService::new(InMemoryBlogStore::new()).execute(42).await;

        assert!(matches!(result, Err(GetPostError::NotFound)));
    }
}
