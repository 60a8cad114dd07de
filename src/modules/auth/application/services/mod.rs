pub mod token_service;

pub use token_service::{TokenService, TokenServiceError, DEFAULT_ACCOUNT_TOKEN_TTL_SECS};
