use actix_web::{put, web, Responder};
use tracing::error;

use super::dto::{PostRequestDto, PostResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::EditPostError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Replaces title, subtitle and body. The cover only changes when a new image is sent.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Blog",
    params(("id" = i32, Path, description = "Post id")),
    request_body = PostRequestDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid form", body = crate::api::schemas::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::api::schemas::ErrorResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::api::schemas::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::api::schemas::ErrorResponse),
        (status = 409, description = "Title already used", body = crate::api::schemas::ErrorResponse),
        (status = 502, description = "Image host failed", body = crate::api::schemas::ErrorResponse)
    )
)]
#[put("/api/posts/{id}")]
pub async fn edit_post_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<PostRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();
    let input = match req.into_inner().into_input() {
        Ok(input) => input,
        Err(message) => return ApiResponse::validation_error(&message),
    };

    match data.blog.edit_post.execute(user.actor(), post_id, input).await {
        Ok(post) => ApiResponse::success(PostResponse::from(post)),

        Err(EditPostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),

        Err(EditPostError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "Only the administrator can edit posts")
        }

        Err(EditPostError::TitleAlreadyExists) => ApiResponse::conflict(
            "TITLE_ALREADY_EXISTS",
            "A post with this title already exists",
        ),

        Err(EditPostError::ImageUploadFailed(e)) => {
            error!(post_id, "Image upload failed while editing post: {}", e);
            ApiResponse::bad_gateway("Image upload failed")
        }

        Err(EditPostError::RepositoryError(e)) => {
            error!(post_id, "Repository error editing post: {}", e);
            ApiResponse::internal_error()
        }
    }
}
