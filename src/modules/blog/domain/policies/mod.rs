pub mod access_policy;
pub mod post_content;

pub use access_policy::{can_create_post, can_mutate_comment, can_mutate_post, is_admin};
pub use post_content::{CommentBody, PostContentError, PostDraft};
