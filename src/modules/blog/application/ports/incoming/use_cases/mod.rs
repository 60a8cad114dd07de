mod add_comment;
mod create_post;
mod delete_comment;
mod delete_post;
mod edit_post;
mod get_post;
mod list_posts;

pub use add_comment::{AddCommentError, AddCommentUseCase};
pub use create_post::{CreatePostError, CreatePostUseCase, PostInput};
pub use delete_comment::{DeleteCommentError, DeleteCommentUseCase};
pub use delete_post::{DeletePostError, DeletePostUseCase};
pub use edit_post::{EditPostError, EditPostUseCase};
pub use get_post::{GetPostError, GetPostUseCase};
pub use list_posts::{
    ListPostsError, ListPostsUseCase, PostPage, DEFAULT_POSTS_LIMIT, MAX_POSTS_LIMIT,
    POSTS_PAGE_STEP,
};
