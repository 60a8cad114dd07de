//! Who may change what. Every check runs after authentication, so the
//! actor is always a real account.

use crate::auth::application::domain::entities::{Actor, Role};
use crate::blog::domain::entities::{Comment, Post};

pub fn is_admin(actor: &Actor) -> bool {
    actor.role == Role::Administrator
}

pub fn can_create_post(actor: &Actor) -> bool {
    is_admin(actor)
}

/// Authorship alone grants nothing on posts.
pub fn can_mutate_post(actor: &Actor, _post: &Post) -> bool {
    is_admin(actor)
}

pub fn can_mutate_comment(actor: &Actor, comment: &Comment) -> bool {
    comment.author_id == actor.id || is_admin(actor)
}
