use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::resend_confirmation::{
    EmailOnlyRequest, ResendConfirmationError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct EmailRequestDto {
    #[schema(example = "john@example.com")]
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Send the confirmation mail again with a fresh link
#[utoipa::path(
    post,
    path = "/api/auth/confirmation/resend",
    tag = "auth",
    request_body = EmailRequestDto,
    responses(
        (status = 200, description = "New confirmation mail sent", body = MessageResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 404, description = "Email not registered", body = ErrorResponse),
        (status = 409, description = "Account already confirmed", body = ErrorResponse),
        (status = 502, description = "Mail could not be sent", body = ErrorResponse),
    )
)]
#[post("/api/auth/confirmation/resend")]
pub async fn resend_confirmation_handler(
    req: web::Json<EmailRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match EmailOnlyRequest::new(req.into_inner().email) {
        Ok(request) => request,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.resend_confirmation_use_case.execute(request).await {
        Ok(()) => {
            info!("Confirmation mail re-sent");
            ApiResponse::success(MessageResponse {
                message: "A new confirmation link has been sent to your email.".to_string(),
            })
        }
        Err(e @ ResendConfirmationError::EmailNotRegistered) => {
            ApiResponse::not_found("EMAIL_NOT_REGISTERED", &e.to_string())
        }
        Err(e @ ResendConfirmationError::AlreadyConfirmed) => {
            ApiResponse::conflict("EMAIL_ALREADY_CONFIRMED", &e.to_string())
        }
        Err(ResendConfirmationError::EmailSendingFailed(e)) => {
            error!(error = %e, "Confirmation mail failed on resend");
            ApiResponse::bad_gateway("The confirmation email could not be sent.")
        }
        Err(ResendConfirmationError::RepositoryError(e)) => {
            error!(error = %e, "Repository error on resend");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::resend_confirmation::IResendConfirmationUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct MockResend {
        result: Result<(), ResendConfirmationError>,
    }

    #[async_trait]
    impl IResendConfirmationUseCase for MockResend {
        async fn execute(&self, _request: EmailOnlyRequest) -> Result<(), ResendConfirmationError> {
            self.result.clone()
        }
    }

    async fn call(result: Result<(), ResendConfirmationError>, email: &str) -> (StatusCode, Value) {
        let app_state = TestAppStateBuilder::default()
            .with_resend_confirmation(MockResend { result })
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(resend_confirmation_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/confirmation/resend")
            .set_json(json!({ "email": email }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn resend_succeeds() {
        let (status, body) = call(Ok(()), "john@example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[actix_web::test]
    async fn unknown_email_is_not_found() {
        let (status, body) = call(
            Err(ResendConfirmationError::EmailNotRegistered),
            "ghost@example.com",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "This email address is not registered.");
    }

    #[actix_web::test]
    async fn confirmed_account_conflicts() {
        let (status, _) = call(
            Err(ResendConfirmationError::AlreadyConfirmed),
            "john@example.com",
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn invalid_email_never_reaches_use_case() {
        let (status, body) = call(Ok(()), "not-an-email").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
