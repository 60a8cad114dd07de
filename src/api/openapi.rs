use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    AvatarUploadDto, ConfirmEmailResponse, EmailRequestDto, LoginRequestDto, LoginResponse,
    LoginUserInfo, LogoutResponseBody, MessageResponse, ProfileResponse, RegisterUserRequest,
    RegisterUserResponse, RegisteredUser, ResetPasswordDto, ResetPasswordResponse,
    ResetTokenResponse, UpdateProfileDto, UserBioDto,
};
// Blog
use crate::blog::adapter::incoming::web::routes::{
    CommentRequestDto, CommentResponse, ImageUploadDto, PostRequestDto, PostResponse,
};
use crate::blog::application::ports::incoming::use_cases::PostPage;
use crate::blog::application::ports::outgoing::{AuthorView, CommentView, PostDetail, PostSummary};
// Contact
use crate::contact::adapter::incoming::web::routes::{ContactRequestDto, ContactResponse};
// Health
use crate::health::{HealthResponse, ReadinessResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "API documentation for the blog: accounts, posts, comments and contact form",
    ),
    paths(
        // Health
        crate::health::health,
        crate::health::readiness,

        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::resend_confirmation_handler,
        crate::auth::adapter::incoming::web::routes::confirm_email_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::request_password_reset_handler,
        crate::auth::adapter::incoming::web::routes::check_reset_token_handler,
        crate::auth::adapter::incoming::web::routes::reset_password_handler,

        // User endpoints
        crate::auth::adapter::incoming::web::routes::fetch_profile_handler,
        crate::auth::adapter::incoming::web::routes::update_profile_handler,

        // Blog endpoints
        crate::blog::adapter::incoming::web::routes::list_posts_handler,
        crate::blog::adapter::incoming::web::routes::get_post_handler,
        crate::blog::adapter::incoming::web::routes::create_post_handler,
        crate::blog::adapter::incoming::web::routes::edit_post_handler,
        crate::blog::adapter::incoming::web::routes::delete_post_handler,
        crate::blog::adapter::incoming::web::routes::add_comment_handler,
        crate::blog::adapter::incoming::web::routes::delete_comment_handler,

        // Contact
        crate::contact::adapter::incoming::web::routes::send_contact_message_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<RegisterUserResponse>,
            SuccessResponse<LoginResponse>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            RegisterUserRequest,
            RegisterUserResponse,
            RegisteredUser,
            EmailRequestDto,
            MessageResponse,
            ConfirmEmailResponse,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            LogoutResponseBody,
            ResetPasswordDto,
            ResetTokenResponse,
            ResetPasswordResponse,
            UpdateProfileDto,
            AvatarUploadDto,
            UserBioDto,
            ProfileResponse,

            // Blog DTOs
            PostPage,
            PostSummary,
            PostDetail,
            AuthorView,
            CommentView,
            PostRequestDto,
            ImageUploadDto,
            PostResponse,
            CommentRequestDto,
            CommentResponse,

            // Contact
            ContactRequestDto,
            ContactResponse,

            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "auth", description = "Registration, confirmation, sessions and password reset"),
        (name = "users", description = "Profile of the logged in user"),
        (name = "Blog", description = "Posts and comments"),
        (name = "contact", description = "Contact form"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/health",
            "/ready",
            "/api/auth/register",
            "/api/auth/confirmation/resend",
            "/confirm_email/{token}",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/password-reset",
            "/reset-password/{token}",
            "/api/users/me",
            "/api/posts",
            "/api/posts/{id}",
            "/api/posts/{id}/comments",
            "/api/posts/{post_id}/comments/{comment_id}",
            "/api/contact",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
