use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest, LoginUserResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "john@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 session token, sent back as `Authorization: Bearer <token>`
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    #[schema(example = "Bearer")]
    token_type: String,

    expires_at: DateTime<Utc>,

    user: LoginUserInfo,
}

#[derive(Serialize, ToSchema)]
pub struct LoginUserInfo {
    #[schema(example = 1)]
    id: i32,

    #[schema(example = "John Doe")]
    name: String,

    #[schema(example = "john@example.com")]
    email: String,

    #[schema(value_type = String, example = "author")]
    role: Role,

    avatar_url: String,
}

impl From<LoginUserResponse> for LoginResponse {
    fn from(session: LoginUserResponse) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_at: session.expires_at,
            user: LoginUserInfo {
                id: session.user.id.value(),
                name: session.user.name,
                email: session.user.email,
                role: session.user.role,
                avatar_url: session.user.avatar_url,
            },
        }
    }
}

/// User login
///
/// Checks email and password of a confirmed account and opens a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful",
            body = inline(SuccessResponse<LoginResponse>)
        ),
        (
            status = 401,
            description = "Unknown email or wrong password",
            body = ErrorResponse,
            examples(
                ("Unknown email" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "EMAIL_NOT_REGISTERED",
                        "message": "This email address is not registered."
                    }
                }))),
                ("Wrong password" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "PASSWORD_MISMATCH",
                        "message": "The username and password doesn't match."
                    }
                })))
            )
        ),
        (
            status = 403,
            description = "Email not confirmed yet",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_NOT_CONFIRMED",
                    "message": "Your email address isn't confirmed."
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.login_user_use_case.execute(request).await {
        Ok(session) => ApiResponse::success(LoginResponse::from(session)),

        Err(e @ LoginError::EmailNotRegistered) => {
            ApiResponse::unauthorized("EMAIL_NOT_REGISTERED", &e.to_string())
        }

        Err(e @ LoginError::PasswordMismatch) => {
            ApiResponse::unauthorized("PASSWORD_MISMATCH", &e.to_string())
        }

        Err(e @ LoginError::EmailNotConfirmed) => {
            warn!("Login refused for unconfirmed account");
            ApiResponse::forbidden("EMAIL_NOT_CONFIRMED", &e.to_string())
        }

        Err(e) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
