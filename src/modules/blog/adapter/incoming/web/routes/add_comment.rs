use actix_web::{post, web, Responder};
use tracing::error;

use super::dto::{CommentRequestDto, CommentResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::AddCommentError;
use crate::blog::domain::policies::CommentBody;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "Blog",
    params(("id" = i32, Path, description = "Post id")),
    request_body = CommentRequestDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Empty or too long comment", body = crate::api::schemas::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::api::schemas::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::api::schemas::ErrorResponse)
    )
)]
#[post("/api/posts/{id}/comments")]
pub async fn add_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<CommentRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();
    let body = match CommentBody::new(&req.body) {
        Ok(body) => body,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.blog.add_comment.execute(user.actor(), post_id, body).await {
        Ok(comment) => ApiResponse::created(CommentResponse::from(comment)),
        Err(AddCommentError::PostNotFound) => {
            ApiResponse::not_found("POST_NOT_FOUND", "Post not found")
        }
        Err(AddCommentError::RepositoryError(e)) => {
            error!(post_id, "Repository error adding comment: {}", e);
            ApiResponse::internal_error()
        }
    }
}
