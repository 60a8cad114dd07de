use actix_web::{post, web, Responder};
use tracing::error;

use super::dto::{PostRequestDto, PostResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::CreatePostError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Blog",
    request_body = PostRequestDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post published", body = PostResponse),
        (status = 400, description = "Invalid form", body = crate::api::schemas::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::api::schemas::ErrorResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::api::schemas::ErrorResponse),
        (status = 409, description = "Title already used", body = crate::api::schemas::ErrorResponse),
        (status = 502, description = "Image host failed", body = crate::api::schemas::ErrorResponse)
    )
)]
#[post("/api/posts")]
pub async fn create_post_handler(
    user: AuthenticatedUser,
    req: web::Json<PostRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let input = match req.into_inner().into_input() {
        Ok(input) => input,
        Err(message) => return ApiResponse::validation_error(&message),
    };

    match data.blog.create_post.execute(user.actor(), input).await {
        Ok(post) => ApiResponse::created(PostResponse::from(post)),

        Err(CreatePostError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "Only the administrator can create posts")
        }

        Err(CreatePostError::TitleAlreadyExists) => ApiResponse::conflict(
            "TITLE_ALREADY_EXISTS",
            "A post with this title already exists",
        ),

        Err(CreatePostError::ImageUploadFailed(e)) => {
            error!("Image upload failed while creating post: {}", e);
            ApiResponse::bad_gateway("Image upload failed")
        }

        Err(CreatePostError::RepositoryError(e)) => {
            error!("Repository error creating post: {}", e);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::auth::application::domain::entities::Role;
    use crate::blog::domain::entities::DEFAULT_POST_IMAGE_URL;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{
        bearer, revocation_data, session_token, token_provider_data, InMemoryRevocationStore,
    };
    use crate::tests::support::in_memory_blog_store::InMemoryBlogStore;
    use crate::tests::support::stubs::{blog_use_cases_for, FixedImageHost};

    fn form(title: &str) -> Value {
        json!({
            "title": title,
            "subtitle": "Subtitle",
            "body": "<p>Body</p>"
        })
    }

    #[actix_web::test]
    async fn administrator_publishes_post_with_default_image() {
        let store = InMemoryBlogStore::new();
        let app_state = TestAppStateBuilder::default().with_blog_store(&store).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(1, Role::Administrator)))
            .set_json(form("First"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["title"], "First");
        assert_eq!(body["data"]["author_id"], 1);
        assert_eq!(body["data"]["image_url"], DEFAULT_POST_IMAGE_URL);
        assert_eq!(store.post_count(), 1);
    }

    #[actix_web::test]
    async fn uploaded_cover_is_hosted() {
        let store = InMemoryBlogStore::new();
        let app_state = TestAppStateBuilder::default().with_blog_store(&store).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let mut payload = form("With cover");
        payload["image"] = json!({ "file_name": "cover.png", "data": STANDARD.encode([1u8, 2, 3]) });

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(1, Role::Administrator)))
            .set_json(payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["image_url"], "https://img.example/uploads/cover.png");
    }

    #[actix_web::test]
    async fn author_is_forbidden() {
        let store = InMemoryBlogStore::new();
        let app_state = TestAppStateBuilder::default().with_blog_store(&store).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(2, Role::Author)))
            .set_json(form("Nope"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.post_count(), 0);
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(form("Anonymous"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_body_is_validation_error() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(1, Role::Administrator)))
            .set_json(json!({ "title": "T", "subtitle": "S", "body": "  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Post content is required.");
    }

    #[actix_web::test]
    async fn duplicate_title_conflicts() {
        let store = InMemoryBlogStore::new();
        store.seed_post("Taken", 1);
        let app_state = TestAppStateBuilder::default().with_blog_store(&store).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(1, Role::Administrator)))
            .set_json(form("Taken"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "TITLE_ALREADY_EXISTS");
    }

    #[actix_web::test]
    async fn image_host_failure_is_bad_gateway() {
        let store = InMemoryBlogStore::new();
        let blog = blog_use_cases_for(&store, Arc::new(FixedImageHost::failing()));
        let app_state = TestAppStateBuilder::default().with_blog(blog).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .app_data(revocation_data(InMemoryRevocationStore::default()))
                .service(create_post_handler),
        )
        .await;

        let mut payload = form("Cover");
        payload["image"] = json!({ "file_name": "cover.jpg", "data": STANDARD.encode([9u8; 4]) });

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&session_token(1, Role::Administrator)))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(store.post_count(), 0);
    }
}
