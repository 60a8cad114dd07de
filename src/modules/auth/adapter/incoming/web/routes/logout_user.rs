use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::logout_user::{LogoutError, LogoutRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponseBody {
    #[schema(example = "Logged out successfully")]
    message: String,
}

/// Revoke the current session token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session revoked", body = LogoutResponseBody),
        (status = 401, description = "Missing, invalid or already revoked token", body = crate::api::schemas::ErrorResponse),
        (status = 500, description = "Revocation store unavailable", body = crate::api::schemas::ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest::new(user.session_token);

    match data.logout_user_use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %user.user_id, "User logged out");
            ApiResponse::success(LogoutResponseBody {
                message: response.message,
            })
        }

        Err(LogoutError::InvalidToken) => {
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token")
        }

        // The token is still live at this point.
        Err(LogoutError::TokenRevocationFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Token revocation failed during logout");
            ApiResponse::internal_error()
        }
    }
}
