use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;

use crate::auth::application::domain::entities::{Actor, Role, UserId};
use crate::auth::application::helpers::session_fingerprint;
use crate::auth::application::ports::outgoing::{SessionRevocationStore, TokenProvider};
use crate::shared::api::ApiResponse;

/// A caller holding a valid, unrevoked session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
    /// Raw bearer token, kept so logout can revoke it.
    pub session_token: String,
}

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn unauthorized(code: &str, message: &str) -> ActixError {
    create_api_error(ApiResponse::unauthorized(code, message))
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider = req
            .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
            .cloned();
        let revocation_store = req
            .app_data::<web::Data<Arc<dyn SessionRevocationStore + Send + Sync>>>()
            .cloned();
        let token = extract_token_from_header(req);

        Box::pin(async move {
            let (Some(token_provider), Some(revocation_store)) = (token_provider, revocation_store)
            else {
                tracing::error!("Authentication services are not registered as app data");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let token = token.ok_or_else(|| {
                unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                )
            })?;

            let claims = token_provider
                .verify_token(&token)
                .map_err(|_| unauthorized("INVALID_TOKEN", "Invalid or expired token"))?;

            match revocation_store
                .is_revoked(&session_fingerprint(&token))
                .await
            {
                Ok(false) => {}
                Ok(true) => {
                    tracing::warn!(user_id = claims.sub, "Rejected revoked session token");
                    return Err(unauthorized("TOKEN_REVOKED", "Session has been logged out"));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Session revocation check failed");
                    return Err(create_api_error(ApiResponse::internal_error()));
                }
            }

            Ok(AuthenticatedUser {
                user_id: claims.user_id(),
                role: claims.role,
                session_token: token,
            })
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
