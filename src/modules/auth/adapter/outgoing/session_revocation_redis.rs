use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::session_revocation::{
    SessionRevocationError, SessionRevocationStore,
};

const KEY_PREFIX: &str = "revoked_session:";

/// Redis-backed revocation list. Entries carry a TTL equal to the remaining
/// lifetime of the session so Redis evicts them on its own.
#[derive(Clone)]
pub struct RedisSessionRevocationStore {
    pool: Arc<Pool>,
}

impl RedisSessionRevocationStore {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn key(fingerprint: &str) -> String {
        format!("{KEY_PREFIX}{fingerprint}")
    }

    /// Seconds until `expires_at`, never less than one.
    fn remaining_ttl(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
        (expires_at - now).num_seconds().max(1) as u64
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, SessionRevocationError> {
        self.pool.get().await.map_err(|e| {
            tracing::error!("Redis pool error: {}", e);
            SessionRevocationError::Unavailable(e.to_string())
        })
    }
}

#[async_trait]
impl SessionRevocationStore for RedisSessionRevocationStore {
    async fn revoke(
        &self,
        fingerprint: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionRevocationError> {
        let mut conn = self.connection().await?;
        let ttl = Self::remaining_ttl(expires_at, Utc::now());

        let _: () = conn
            .set_ex(Self::key(fingerprint), user_id.value(), ttl)
            .await
            .map_err(|e| SessionRevocationError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, SessionRevocationError> {
        let mut conn = self.connection().await?;

        conn.exists(Self::key(fingerprint))
            .await
            .map_err(|e| SessionRevocationError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use deadpool_redis::{Config, Runtime};

    #[test]
    fn ttl_tracks_remaining_session_lifetime() {
        let now = Utc::now();

        assert_eq!(
            RedisSessionRevocationStore::remaining_ttl(now + Duration::seconds(900), now),
            900
        );
        assert_eq!(
            RedisSessionRevocationStore::remaining_ttl(now - Duration::seconds(5), now),
            1
        );
    }

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(
            RedisSessionRevocationStore::key("abc"),
            "revoked_session:abc"
        );
    }

    #[tokio::test]
    async fn unreachable_redis_reports_unavailable() {
        let pool = Config::from_url("redis://127.0.0.1:1")
            .create_pool(Some(Runtime::Tokio1))
            .unwrap();
        let store = RedisSessionRevocationStore::new(Arc::new(pool));

        let result = store.is_revoked("abc").await;

        assert!(matches!(result, Err(SessionRevocationError::Unavailable(_))));
    }

    // Runs only when a Redis instance is reachable through REDIS_URL.
    #[tokio::test]
    async fn revoke_then_check_against_live_redis() {
        crate::tests::support::load_test_env();
        let Ok(url) = std::env::var("REDIS_URL") else {
            return;
        };
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .unwrap();
        let store = RedisSessionRevocationStore::new(Arc::new(pool));
        let fingerprint = uuid::Uuid::new_v4().to_string();

        assert!(!store.is_revoked(&fingerprint).await.unwrap());
        store
            .revoke(&fingerprint, UserId::from(1), Utc::now() + Duration::seconds(30))
            .await
            .unwrap();
        assert!(store.is_revoked(&fingerprint).await.unwrap());
    }
}
