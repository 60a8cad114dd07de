use std::sync::Arc;

use crate::blog::application::ports::incoming::use_cases::{
    AddCommentUseCase, CreatePostUseCase, DeleteCommentUseCase, DeletePostUseCase,
    EditPostUseCase, GetPostUseCase, ListPostsUseCase,
};

#[derive(Clone)]
pub struct BlogUseCases {
    pub list_posts: Arc<dyn ListPostsUseCase + Send + Sync>,
    pub get_post: Arc<dyn GetPostUseCase + Send + Sync>,
    pub create_post: Arc<dyn CreatePostUseCase + Send + Sync>,
    pub edit_post: Arc<dyn EditPostUseCase + Send + Sync>,
    pub delete_post: Arc<dyn DeletePostUseCase + Send + Sync>,
    pub add_comment: Arc<dyn AddCommentUseCase + Send + Sync>,
    pub delete_comment: Arc<dyn DeleteCommentUseCase + Send + Sync>,
}
