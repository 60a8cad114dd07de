pub mod password_hasher;
pub mod session_revocation;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use password_hasher::{HashError, PasswordHasher};
pub use session_revocation::{SessionRevocationError, SessionRevocationStore};
pub use token_provider::{IssuedSession, TokenClaims, TokenError, TokenProvider};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{NewUser, ProfileChanges, UserRepository, UserRepositoryError};
