mod add_comment;
mod create_post;
mod delete_comment;
mod delete_post;
mod dto;
mod edit_post;
mod get_post;
mod list_posts;

pub use add_comment::add_comment_handler;
pub use create_post::create_post_handler;
pub use delete_comment::delete_comment_handler;
pub use delete_post::delete_post_handler;
pub use dto::{CommentRequestDto, CommentResponse, ImageUploadDto, PostRequestDto, PostResponse};
pub use edit_post::edit_post_handler;
pub use get_post::get_post_handler;
pub use list_posts::{list_posts_handler, ListPostsParams};

// utoipa path structs, referenced by the OpenAPI derive
pub use add_comment::{__path_add_comment_handler};
pub use create_post::{__path_create_post_handler};
pub use delete_comment::{__path_delete_comment_handler};
pub use delete_post::{__path_delete_post_handler};
pub use edit_post::{__path_edit_post_handler};
pub use get_post::{__path_get_post_handler};
pub use list_posts::{__path_list_posts_handler};
