use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::{Role, UserId};
use crate::auth::application::ports::outgoing::{
    SessionRevocationError, SessionRevocationStore, TokenProvider,
};

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn create_test_jwt_service() -> JwtTokenService {
    let config = JwtConfig::new(TEST_JWT_SECRET.to_string(), "blog".to_string(), 3600)
        .expect("valid test jwt config");
    JwtTokenService::new(config)
}

/// Fresh access token for `user_id` signed with the test secret.
pub fn session_token(user_id: i32, role: Role) -> String {
    create_test_jwt_service()
        .generate_access_token(UserId::from(user_id), role)
        .expect("test token")
        .token
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    web::Data::new(Arc::new(create_test_jwt_service()) as Arc<dyn TokenProvider + Send + Sync>)
}

pub fn revocation_data(
    store: InMemoryRevocationStore,
) -> web::Data<Arc<dyn SessionRevocationStore + Send + Sync>> {
    web::Data::new(Arc::new(store) as Arc<dyn SessionRevocationStore + Send + Sync>)
}

/// Same as [`revocation_data`] but keeps a handle for the use case under test.
pub fn shared_revocation_data(
    store: Arc<InMemoryRevocationStore>,
) -> web::Data<Arc<dyn SessionRevocationStore + Send + Sync>> {
    web::Data::new(store as Arc<dyn SessionRevocationStore + Send + Sync>)
}

#[derive(Default)]
pub struct InMemoryRevocationStore {
    revoked: Mutex<HashSet<String>>,
    unavailable: bool,
}

impl InMemoryRevocationStore {
    pub fn unavailable() -> Self {
        Self {
            revoked: Mutex::default(),
            unavailable: true,
        }
    }

    pub fn insert(&self, fingerprint: &str) {
        self.revoked.lock().unwrap().insert(fingerprint.to_string());
    }
}

#[async_trait]
impl SessionRevocationStore for InMemoryRevocationStore {
    async fn revoke(
        &self,
        fingerprint: &str,
        _user_id: UserId,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), SessionRevocationError> {
        if self.unavailable {
            return Err(SessionRevocationError::Unavailable("redis down".to_string()));
        }
        self.insert(fingerprint);
        Ok(())
    }

    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, SessionRevocationError> {
        if self.unavailable {
            return Err(SessionRevocationError::Unavailable("redis down".to_string()));
        }
        Ok(self.revoked.lock().unwrap().contains(fingerprint))
    }
}
