use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::confirm_email::ConfirmEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct ConfirmEmailResponse {
    #[schema(example = "Your email has been confirmed. You can now log in.")]
    message: String,

    #[schema(example = "john@example.com")]
    email: String,
}

/// Redeem the link from the confirmation mail
#[utoipa::path(
    get,
    path = "/confirm_email/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Token from the confirmation mail")),
    responses(
        (status = 200, description = "Email confirmed", body = ConfirmEmailResponse),
        (status = 403, description = "Unknown, expired or already used link", body = ErrorResponse),
    )
)]
#[get("/confirm_email/{token}")]
pub async fn confirm_email_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = path.into_inner();

    match data.confirm_email_use_case.execute(&token).await {
        Ok(confirmed) => ApiResponse::success(ConfirmEmailResponse {
            message: "Your email has been confirmed. You can now log in.".to_string(),
            email: confirmed.email,
        }),
        Err(e @ ConfirmEmailError::TokenNotFound) => {
            ApiResponse::forbidden("INVALID_TOKEN", &e.to_string())
        }
        Err(ConfirmEmailError::RepositoryError(e)) => {
            error!(error = %e, "Repository error confirming email");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::auth::application::use_cases::confirm_email::ConfirmEmailUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::in_memory_user_store::InMemoryUserStore;
    use crate::tests::support::stubs::token_service_for;
    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use serde_json::Value;

    #[actix_web::test]
    async fn only_the_stored_token_confirms() {
        let store = Arc::new(InMemoryUserStore::new());
        let user = store.insert_user("u@example.com", "h", false, Role::Author);
        store.set_token(user.id, "abc123", Utc::now());

        let app_state = TestAppStateBuilder::default()
            .with_confirm_email(ConfirmEmailUseCase::new(token_service_for(&store)))
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(confirm_email_handler)).await;

        let wrong = test::TestRequest::get().uri("/confirm_email/abc999").to_request();
        let resp = test::call_service(&app, wrong).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(!store.get(user.id).unwrap().is_confirmed);

        let right = test::TestRequest::get().uri("/confirm_email/abc123").to_request();
        let resp = test::call_service(&app, right).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["email"], "u@example.com");

        let stored = store.get(user.id).unwrap();
        assert!(stored.is_confirmed);
        assert!(stored.token.is_none());

        let again = test::TestRequest::get().uri("/confirm_email/abc123").to_request();
        let resp = test::call_service(&app, again).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
