use async_trait::async_trait;

use crate::blog::application::ports::incoming::use_cases::{
    ListPostsError, ListPostsUseCase, PostPage, DEFAULT_POSTS_LIMIT, MAX_POSTS_LIMIT,
    POSTS_PAGE_STEP,
};
use crate::blog::application::ports::outgoing::{PostQuery, PostQueryError};

pub struct ListPostsService<Q>
where
    Q: PostQuery,
{
    query: Q,
}

impl<Q> ListPostsService<Q>
where
    Q: PostQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListPostsUseCase for ListPostsService<Q>
where
    Q: PostQuery + Send + Sync,
{
    async fn execute(&self, limit: Option<u64>) -> Result<PostPage, ListPostsError> {
        let limit = limit
            .unwrap_or(DEFAULT_POSTS_LIMIT)
            .clamp(1, MAX_POSTS_LIMIT);

        // One extra row tells whether another step exists.
        let mut posts = self
            .query
            .list_recent(limit + 1)
            .await
            .map_err(|PostQueryError::DatabaseError(msg)| ListPostsError::QueryError(msg))?;

        let has_more = posts.len() as u64 > limit;
        posts.truncate(limit as usize);

        Ok(PostPage {
            posts,
            limit,
            has_more,
            next_limit: has_more.then(|| (limit + POSTS_PAGE_STEP).min(MAX_POSTS_LIMIT)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory_blog_store::InMemoryBlogStore;

    fn store_with_posts(n: usize) -> InMemoryBlogStore {
        let store = InMemoryBlogStore::new();
        for i in 1..=n {
            store.seed_post(&format!("Post {i}"), 1);
        }
        store
    }

    #[tokio::test]
    async fn first_page_shows_three_newest() {
        let service = ListPostsService::new(store_with_posts(5));

        let page = service.execute(None).await.unwrap();

        assert_eq!(page.limit, 3);
        let titles: Vec<_> = page.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 5", "Post 4", "Post 3"]);
        assert!(page.has_more);
        assert_eq!(page.next_limit, Some(6));
    }

    #[tokio::test]
    async fn last_step_has_no_more() {
        let service = ListPostsService::new(store_with_posts(5));

        let page = service.execute(Some(6)).await.unwrap();

        assert_eq!(page.posts.len(), 5);
        assert!(!page.has_more);
        assert_eq!(page.next_limit, None);
    }

    #[tokio::test]
    async fn exact_fit_has_no_more() {
        let service = ListPostsService::new(store_with_posts(3));

        let page = service.execute(Some(3)).await.unwrap();

        assert_eq!(page.posts.len(), 3);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let service = ListPostsService::new(store_with_posts(2));

        assert_eq!(service.execute(Some(0)).await.unwrap().limit, 1);
        assert_eq!(
            service.execute(Some(10_000)).await.unwrap().limit,
            MAX_POSTS_LIMIT
        );
    }
}
