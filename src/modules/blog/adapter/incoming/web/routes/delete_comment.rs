use actix_web::{delete, web, Responder};
use tracing::error;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::DeleteCommentError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "Blog",
    params(
        ("post_id" = i32, Path, description = "Post the comment belongs to"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not logged in", body = crate::api::schemas::ErrorResponse),
        (status = 403, description = "Neither the comment author nor the administrator", body = crate::api::schemas::ErrorResponse),
        (status = 404, description = "Comment not found under this post", body = crate::api::schemas::ErrorResponse)
    )
)]
#[delete("/api/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<(i32, i32)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (post_id, comment_id) = path.into_inner();

    match data
        .blog
        .delete_comment
        .execute(user.actor(), post_id, comment_id)
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(DeleteCommentError::NotFound) => {
            ApiResponse::not_found("COMMENT_NOT_FOUND", "Comment not found")
        }
        Err(DeleteCommentError::Forbidden) => ApiResponse::forbidden(
            "FORBIDDEN",
            "Only the comment author or the administrator can delete this comment",
        ),
        Err(DeleteCommentError::RepositoryError(e)) => {
            error!(comment_id, "Repository error deleting comment: {}", e);
            ApiResponse::internal_error()
        }
    }
}
