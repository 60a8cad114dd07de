use actix_web::{get, web, Responder};
use tracing::error;

use crate::blog::application::ports::incoming::use_cases::GetPostError;
use crate::blog::application::ports::outgoing::PostDetail;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Blog",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with its comments", body = PostDetail),
        (status = 404, description = "Post not found", body = crate::api::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/posts/{id}")]
pub async fn get_post_handler(path: web::Path<i32>, data: web::Data<AppState>) -> impl Responder {
    let post_id = path.into_inner();

    match data.blog.get_post.execute(post_id).await {
        Ok(detail) => ApiResponse::success(detail),
        Err(GetPostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(GetPostError::QueryError(e)) => {
            error!(post_id, "Failed to load post: {}", e);
            ApiResponse::internal_error()
        }
    }
}
