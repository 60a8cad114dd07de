// src/config.rs
use std::env;

use chrono::Duration;

const DEFAULT_ACCOUNT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} has an invalid value")]
    Invalid(&'static str),
}

/// How outgoing mail leaves the server.
#[derive(Clone, PartialEq, Eq)]
pub enum SmtpSettings {
    /// STARTTLS relay with credentials.
    Relay {
        server: String,
        username: String,
        password: String,
    },
    /// Unauthenticated local catcher such as Mailpit, used when `RUST_ENV=test`.
    Local { host: String, port: u16 },
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtpSettings::Relay {
                server, username, ..
            } => f
                .debug_struct("Relay")
                .field("server", server)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            SmtpSettings::Local { host, port } => f
                .debug_struct("Local")
                .field("host", host)
                .field("port", port)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    /// Prefix of the links mailed to users, without a trailing slash.
    pub app_base_url: String,
    pub account_token_ttl: Duration,
    pub site_owner_email: String,
    pub email_from: String,
    pub smtp: SmtpSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = required("PORT")?
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let ttl_secs = match lookup("ACCOUNT_TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("ACCOUNT_TOKEN_TTL_SECS"))?,
            None => DEFAULT_ACCOUNT_TOKEN_TTL_SECS,
        };

        let smtp = if lookup("RUST_ENV").as_deref() == Some("test") {
            SmtpSettings::Local {
                host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("SMTP_PORT")
                    .unwrap_or_else(|| "1025".to_string())
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SMTP_PORT"))?,
            }
        } else {
            SmtpSettings::Relay {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }
        };

        Ok(Self {
            host: required("HOST")?,
            port,
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            app_base_url: required("APP_BASE_URL")?.trim_end_matches('/').to_string(),
            account_token_ttl: Duration::seconds(ttl_secs),
            site_owner_email: required("SITE_OWNER_EMAIL")?,
            email_from: required("EMAIL_FROM")?,
            smtp,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads `.env.{RUST_ENV}` when present, otherwise `.env`.
pub fn load_dotenv() {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    if dotenvy::from_filename(format!(".env.{}", env)).is_err() {
        dotenvy::dotenv().ok();
    }
}
