mod add_comment_service;
mod create_post_service;
mod delete_comment_service;
mod delete_post_service;
mod edit_post_service;
mod get_post_service;
mod list_posts_service;

pub use add_comment_service::AddCommentService;
pub use create_post_service::CreatePostService;
pub use delete_comment_service::DeleteCommentService;
pub use delete_post_service::DeletePostService;
pub use edit_post_service::EditPostService;
pub use get_post_service::GetPostService;
pub use list_posts_service::ListPostsService;
