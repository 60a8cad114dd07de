use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::domain::entities::{UserId, DEFAULT_AVATAR_URL};
use crate::blog::application::ports::outgoing::{
    AuthorView, CommentRepository, CommentRepositoryError, CommentView, NewComment, NewPost,
    PostChanges, PostDetail, PostQuery, PostQueryError, PostRepository, PostRepositoryError,
    PostSummary,
};
use crate::blog::domain::entities::{Comment, Post};

#[derive(Default)]
struct Inner {
    next_post_id: i32,
    next_comment_id: i32,
    posts: BTreeMap<i32, Post>,
    comments: BTreeMap<i32, Comment>,
    authors: HashMap<i32, String>,
}

/// Posts and comments kept in memory. Clones share the same data, so one
/// store can back the query and both repositories.
#[derive(Clone, Default)]
pub struct InMemoryBlogStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author(&self, id: i32, name: &str) {
        self.inner
            .lock()
            .unwrap()
            .authors
            .insert(id, name.to_string());
    }

    pub fn seed_post(&self, title: &str, author_id: i32) -> Post {
        let mut inner = self.inner.lock().unwrap();
        inner.next_post_id += 1;
        let post = Post {
            id: inner.next_post_id,
            title: title.to_string(),
            subtitle: format!("{title} subtitle"),
            body: format!("<p>{title}</p>"),
            image_url: "https://img.example/post.png".to_string(),
            author_id: UserId::from(author_id),
            created_on: Utc::now().date_naive(),
            updated_at: Utc::now(),
        };
        inner.posts.insert(post.id, post.clone());
        post
    }

    pub fn seed_comment(&self, post_id: i32, author_id: i32, body: &str) -> Comment {
        let mut inner = self.inner.lock().unwrap();
        inner.next_comment_id += 1;
        let comment = Comment {
            id: inner.next_comment_id,
            body: body.to_string(),
            author_id: UserId::from(author_id),
            post_id,
            created_at: Utc::now(),
        };
        inner.comments.insert(comment.id, comment.clone());
        comment
    }

    pub fn post(&self, id: i32) -> Option<Post> {
        self.inner.lock().unwrap().posts.get(&id).cloned()
    }

    pub fn comment(&self, id: i32) -> Option<Comment> {
        self.inner.lock().unwrap().comments.get(&id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.inner.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.inner.lock().unwrap().comments.len()
    }
}

fn author_view(inner: &Inner, id: UserId) -> AuthorView {
    AuthorView {
        id: id.value(),
        name: inner
            .authors
            .get(&id.value())
            .cloned()
            .unwrap_or_else(|| format!("user{}", id)),
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
    }
}

#[async_trait]
impl PostQuery for InMemoryBlogStore {
    async fn list_recent(&self, limit: u64) -> Result<Vec<PostSummary>, PostQueryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .posts
            .values()
            .rev()
            .take(limit as usize)
            .map(|p| PostSummary {
                id: p.id,
                title: p.title.clone(),
                subtitle: p.subtitle.clone(),
                image_url: p.image_url.clone(),
                author: author_view(&inner, p.author_id),
                created_on: p.created_on,
            })
            .collect())
    }

    async fn find_by_id(&self, post_id: i32) -> Result<Option<Post>, PostQueryError> {
        Ok(self.post(post_id))
    }

    async fn find_detail(&self, post_id: i32) -> Result<Option<PostDetail>, PostQueryError> {
        let inner = self.inner.lock().unwrap();
        let Some(post) = inner.posts.get(&post_id) else {
            return Ok(None);
        };

        let comments = inner
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentView {
                id: c.id,
                body: c.body.clone(),
                author: author_view(&inner, c.author_id),
                created_at: c.created_at,
            })
            .collect();

        Ok(Some(PostDetail {
            id: post.id,
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            body: post.body.clone(),
            image_url: post.image_url.clone(),
            author: author_view(&inner, post.author_id),
            created_on: post.created_on,
            updated_at: post.updated_at,
            comments,
        }))
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn create_post(&self, new: NewPost) -> Result<Post, PostRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.posts.values().any(|p| p.title == new.title) {
            return Err(PostRepositoryError::TitleAlreadyExists);
        }
        inner.next_post_id += 1;
        let post = Post {
            id: inner.next_post_id,
            title: new.title,
            subtitle: new.subtitle,
            body: new.body,
            image_url: new.image_url,
            author_id: new.author_id,
            created_on: Utc::now().date_naive(),
            updated_at: Utc::now(),
        };
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: i32,
        changes: PostChanges,
    ) -> Result<Post, PostRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .posts
            .values()
            .any(|p| p.id != post_id && p.title == changes.title)
        {
            return Err(PostRepositoryError::TitleAlreadyExists);
        }
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or(PostRepositoryError::NotFound)?;
        post.title = changes.title;
        post.subtitle = changes.subtitle;
        post.body = changes.body;
        if let Some(url) = changes.image_url {
            post.image_url = url;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete_post(&self, post_id: i32) -> Result<(), PostRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.posts.remove(&post_id).is_none() {
            return Err(PostRepositoryError::NotFound);
        }
        inner.comments.retain(|_, c| c.post_id != post_id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn add_comment(&self, new: NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.posts.contains_key(&new.post_id) {
            return Err(CommentRepositoryError::PostNotFound);
        }
        inner.next_comment_id += 1;
        let comment = Comment {
            id: inner.next_comment_id,
            body: new.body,
            author_id: new.author_id,
            post_id: new.post_id,
            created_at: Utc::now(),
        };
        inner.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, comment_id: i32) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.comment(comment_id))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<(), CommentRepositoryError> {
        self.inner
            .lock()
            .unwrap()
            .comments
            .remove(&comment_id)
            .map(|_| ())
            .ok_or(CommentRepositoryError::NotFound)
    }
}
