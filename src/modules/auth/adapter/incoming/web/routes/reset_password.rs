use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::reset_password::{
    ResetPasswordCommand, ResetPasswordError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordDto {
    #[schema(example = "NewSecurePass123!")]
    pub password: String,

    #[schema(example = "NewSecurePass123!")]
    pub confirm_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct ResetTokenResponse {
    /// Account the link was issued for
    #[schema(example = "john@example.com")]
    email: String,
}

#[derive(Serialize, ToSchema)]
pub struct ResetPasswordResponse {
    #[schema(example = "Your password has been reset. You can now log in.")]
    message: String,
}

fn map_reset_error(err: ResetPasswordError) -> actix_web::HttpResponse {
    match err {
        e @ ResetPasswordError::TokenNotFound => {
            ApiResponse::forbidden("INVALID_TOKEN", &e.to_string())
        }
        ResetPasswordError::InvalidPassword(e) => ApiResponse::validation_error(&e.to_string()),
        other => {
            error!(error = %other, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}

/// Check a reset link before showing the new-password form
#[utoipa::path(
    get,
    path = "/reset-password/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Token from the reset mail")),
    responses(
        (status = 200, description = "Link is valid", body = ResetTokenResponse),
        (status = 403, description = "Unknown, expired or used link", body = ErrorResponse),
    )
)]
#[get("/reset-password/{token}")]
pub async fn check_reset_token_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.reset_password_use_case.check_token(&path).await {
        Ok(info) => ApiResponse::success(ResetTokenResponse { email: info.email }),
        Err(e) => map_reset_error(e),
    }
}

/// Set a new password with a reset link
#[utoipa::path(
    post,
    path = "/reset-password/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Token from the reset mail")),
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password replaced", body = ResetPasswordResponse),
        (status = 400, description = "Empty or mismatched passwords", body = ErrorResponse),
        (status = 403, description = "Unknown, expired or used link", body = ErrorResponse),
    )
)]
#[post("/reset-password/{token}")]
pub async fn reset_password_handler(
    path: web::Path<String>,
    req: web::Json<ResetPasswordDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let command = ResetPasswordCommand {
        token: path.into_inner(),
        password: dto.password,
        confirm_password: dto.confirm_password,
    };

    match data.reset_password_use_case.execute(command).await {
        Ok(()) => ApiResponse::success(ResetPasswordResponse {
            message: "Your password has been reset. You can now log in.".to_string(),
        }),
        Err(e) => map_reset_error(e),
    }
}
