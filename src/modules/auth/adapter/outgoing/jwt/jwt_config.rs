use std::env;

#[derive(Debug, Clone, thiserror::Error)]
pub enum JwtConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("JWT_SECRET must be at least 32 characters long for HS256 algorithm")]
    SecretTooShort,

    #[error("Invalid {0} value")]
    InvalidExpiry(&'static str),

    #[error("JWT_ACCESS_EXPIRY must be between 1 and 86400 seconds (24 hours)")]
    ExpiryOutOfRange,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // seconds
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    fn parse_expiry(key: &'static str, default: &str) -> Result<i64, JwtConfigError> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<i64>()
            .map_err(|_| JwtConfigError::InvalidExpiry(key))
    }

    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, JwtConfigError> {
        let secret_key = env::var("JWT_SECRET").map_err(|_| JwtConfigError::MissingSecret)?;
        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "blog".to_string());
        let access_token_expiry = Self::parse_expiry("JWT_ACCESS_EXPIRY", "1800")?;

        Self::new(secret_key, issuer, access_token_expiry)
    }

    pub fn new(
        secret_key: String,
        issuer: String,
        access_token_expiry: i64,
    ) -> Result<Self, JwtConfigError> {
        // HS256 requires at least 32 bytes
        if secret_key.len() < 32 {
            return Err(JwtConfigError::SecretTooShort);
        }
        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(JwtConfigError::ExpiryOutOfRange);
        }

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
