use actix_web::{delete, web, Responder};
use tracing::error;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::DeletePostError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Deletes the post together with its comments.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Blog",
    params(("id" = i32, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not logged in", body = crate::api::schemas::ErrorResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::api::schemas::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::api::schemas::ErrorResponse)
    )
)]
#[delete("/api/posts/{id}")]
pub async fn delete_post_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();

    match data.blog.delete_post.execute(user.actor(), post_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(DeletePostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(DeletePostError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "Only the administrator can delete posts")
        }
        Err(DeletePostError::RepositoryError(e)) => {
            error!(post_id, "Repository error deleting post: {}", e);
            ApiResponse::internal_error()
        }
    }
}
