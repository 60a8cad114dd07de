use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionRevocationError {
    #[error("Revocation store unavailable: {0}")]
    Unavailable(String),
}

/// Keeps fingerprints of session tokens ended by logout until they would have
/// expired anyway.
#[async_trait]
pub trait SessionRevocationStore: Send + Sync {
    async fn revoke(
        &self,
        fingerprint: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionRevocationError>;

    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, SessionRevocationError>;
}
