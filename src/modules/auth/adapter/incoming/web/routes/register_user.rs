use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, RegisterRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for user registration
#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Display name shown on posts and comments
    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,

    /// Must equal `password`
    #[schema(example = "SecurePass123!")]
    pub confirm_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterUserResponse {
    #[schema(example = "Registration successful. Please check your email to confirm your account.")]
    message: String,

    user: RegisteredUser,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(example = 1)]
    id: i32,

    #[schema(example = "John Doe")]
    name: String,

    #[schema(example = "john@example.com")]
    email: String,

    /// The first account registered becomes the administrator
    #[schema(value_type = String, example = "administrator")]
    role: Role,
}

fn map_create_user_error(err: CreateUserError, email: &str) -> HttpResponse {
    match err {
        CreateUserError::EmailAlreadyExists => {
            warn!(email = %email, "Registration with existing email");
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", &err.to_string())
        }
        other => {
            error!(email = %email, error = %other, "User creation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new user
///
/// Creates an unconfirmed account and mails the confirmation link. The account
/// cannot log in until the link is visited.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (
            status = 201,
            description = "User created, confirmation mail sent",
            body = inline(SuccessResponse<RegisterUserResponse>),
            example = json!({
                "success": true,
                "data": {
                    "message": "Registration successful. Please check your email to confirm your account.",
                    "user": {
                        "id": 1,
                        "name": "John Doe",
                        "email": "john@example.com",
                        "role": "administrator"
                    }
                }
            })
        ),
        (
            status = 400,
            description = "Validation error",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "Passwords must match" }
            })
        ),
        (
            status = 409,
            description = "Email already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_ALREADY_EXISTS",
                    "message": "This email address already exists in database, try to Log in."
                }
            })
        ),
        (status = 502, description = "Confirmation mail could not be sent", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let email = dto.email.trim().to_string();

    info!(email = %email, "User registration attempt");

    let request = match RegisterRequest::new(dto.name, dto.email, dto.password, dto.confirm_password)
    {
        Ok(request) => request,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.register_user_orchestrator.register_user(request).await {
        Ok(user) => {
            info!(user_id = %user.user_id, role = %user.role, "User registered");

            ApiResponse::created(RegisterUserResponse {
                message: user.message,
                user: RegisteredUser {
                    id: user.user_id.value(),
                    name: user.name,
                    email: user.email,
                    role: user.role,
                },
            })
        }

        Err(UserRegistrationError::CreateUserFailed(e)) => map_create_user_error(e, &email),

        Err(UserRegistrationError::EmailSendingFailed(e)) => {
            error!(email = %email, error = %e, "Confirmation mail failed after registration");
            ApiResponse::bad_gateway("The confirmation email could not be sent.")
        }
    }
}
