pub mod comment_repository;
pub mod post_query;
pub mod post_repository;

pub use comment_repository::{CommentRepository, CommentRepositoryError, NewComment};
pub use post_query::{
    AuthorView, CommentView, PostDetail, PostQuery, PostQueryError, PostSummary,
};
pub use post_repository::{NewPost, PostChanges, PostRepository, PostRepositoryError};
