use actix_web::{post, web, Responder};
use tracing::error;

use super::resend_confirmation::{EmailRequestDto, MessageResponse};
use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::request_password_reset::RequestPasswordResetError;
use crate::auth::application::use_cases::resend_confirmation::EmailOnlyRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Mail a password reset link
#[utoipa::path(
    post,
    path = "/api/auth/password-reset",
    tag = "auth",
    request_body = EmailRequestDto,
    responses(
        (status = 200, description = "Reset link sent", body = MessageResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 404, description = "Email not registered", body = ErrorResponse),
        (status = 502, description = "Mail could not be sent", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset")]
pub async fn request_password_reset_handler(
    req: web::Json<EmailRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match EmailOnlyRequest::new(req.into_inner().email) {
        Ok(request) => request,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.request_password_reset_use_case.execute(request).await {
        Ok(()) => ApiResponse::success(MessageResponse {
            message: "A link to reset your password has been sent to your email.".to_string(),
        }),
        Err(e @ RequestPasswordResetError::EmailNotRegistered) => {
            ApiResponse::not_found("EMAIL_NOT_REGISTERED", &e.to_string())
        }
        Err(RequestPasswordResetError::EmailSendingFailed(e)) => {
            error!(error = %e, "Password reset mail failed");
            ApiResponse::bad_gateway("The password reset email could not be sent.")
        }
        Err(RequestPasswordResetError::RepositoryError(e)) => {
            error!(error = %e, "Repository error requesting password reset");
            ApiResponse::internal_error()
        }
    }
}
