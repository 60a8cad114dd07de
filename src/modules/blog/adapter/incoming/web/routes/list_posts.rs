use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::blog::application::ports::incoming::use_cases::{ListPostsError, PostPage};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPostsParams {
    /// How many posts to show. Defaults to 3, clamped to 1..=99.
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Blog",
    params(ListPostsParams),
    responses(
        (status = 200, description = "Newest posts first", body = PostPage),
        (status = 500, description = "Internal server error", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/posts")]
pub async fn list_posts_handler(
    params: web::Query<ListPostsParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.blog.list_posts.execute(params.limit).await {
        Ok(page) => ApiResponse::success(page),
        Err(ListPostsError::QueryError(e)) => {
            error!("Failed to list posts: {}", e);
            ApiResponse::internal_error()
        }
    }
}
