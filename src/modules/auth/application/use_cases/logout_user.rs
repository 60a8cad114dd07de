use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::auth::application::helpers::session_fingerprint;
use crate::auth::application::ports::outgoing::{
    SessionRevocationError, SessionRevocationStore, TokenProvider,
};

// ========================= Logout Request =========================
#[derive(Debug, Clone)]
pub struct LogoutRequest {
    session_token: String,
}

impl LogoutRequest {
    pub fn new(session_token: String) -> Self {
        Self { session_token }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }
}

// ====================== Logout Response =============================
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

// ====================== Logout Error =============================
#[derive(Debug, Clone)]
pub enum LogoutError {
    InvalidToken,
    TokenRevocationFailed(String),
}

impl std::fmt::Display for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutError::InvalidToken => write!(f, "Invalid or expired token"),
            LogoutError::TokenRevocationFailed(msg) => {
                write!(f, "Token revocation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for LogoutError {}

impl From<SessionRevocationError> for LogoutError {
    fn from(error: SessionRevocationError) -> Self {
        LogoutError::TokenRevocationFailed(error.to_string())
    }
}

// ============================ Logout Use Case =============================
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    revocation_store: Arc<dyn SessionRevocationStore + Send + Sync>,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl LogoutUseCase {
    pub fn new(
        revocation_store: Arc<dyn SessionRevocationStore + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            revocation_store,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        let claims = self
            .token_provider
            .verify_token(request.session_token())
            .map_err(|_| LogoutError::InvalidToken)?;

        let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
            .ok_or(LogoutError::InvalidToken)?;

        self.revocation_store
            .revoke(
                &session_fingerprint(request.session_token()),
                claims.user_id(),
                expires_at,
            )
            .await?;

        info!(user_id = %claims.sub, "Session revoked");

        Ok(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })
    }
}
