use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;

use crate::auth::application::domain::entities::{Role, User, UserId, DEFAULT_AVATAR_URL};
use crate::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::TokenService;

const MAX_NAME_LEN: usize = 250;

// ========================= Register Request =========================
/// Validated registration form.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterRequestError {
    EmptyName,
    NameTooLong,
    EmptyEmail,
    InvalidEmailFormat,
    EmptyPassword,
    PasswordMismatch,
}

impl std::fmt::Display for RegisterRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterRequestError::EmptyName => write!(f, "Name is required"),
            RegisterRequestError::NameTooLong => {
                write!(f, "Name cannot exceed {} characters", MAX_NAME_LEN)
            }
            RegisterRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            RegisterRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            RegisterRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
            RegisterRequestError::PasswordMismatch => write!(f, "Passwords must match"),
        }
    }
}

impl std::error::Error for RegisterRequestError {}

impl RegisterRequest {
    pub fn new(
        name: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> Result<Self, RegisterRequestError> {
        let name = validate_name(&name)?;
        let email = validate_email(&email)?;

        if password.is_empty() {
            return Err(RegisterRequestError::EmptyPassword);
        }
        if password != confirm_password {
            return Err(RegisterRequestError::PasswordMismatch);
        }

        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, RegisterRequestError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RegisterRequestError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(RegisterRequestError::NameTooLong);
    }
    Ok(name.to_string())
}

/// Trims surrounding whitespace; the address is otherwise kept as typed.
pub(crate) fn validate_email(email: &str) -> Result<String, RegisterRequestError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(RegisterRequestError::EmptyEmail);
    }
    if !EmailAddress::is_valid(email) {
        return Err(RegisterRequestError::InvalidEmailFormat);
    }
    Ok(email.to_string())
}

// ========================= Create User Error =========================
#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error("This email address already exists in database, try to Log in.")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ========================= Create User Output =========================
#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub confirmation_token: String,
}

// ========================= Create User Use Case =========================
#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, request: RegisterRequest) -> Result<CreateUserOutput, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase {
    query: Arc<dyn UserQuery + Send + Sync>,
    repository: Arc<dyn UserRepository + Send + Sync>,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    token_service: TokenService,
}

impl CreateUserUseCase {
    pub fn new(
        query: Arc<dyn UserQuery + Send + Sync>,
        repository: Arc<dyn UserRepository + Send + Sync>,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        token_service: TokenService,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_service,
        }
    }

    /// The first account becomes the administrator. If another registration
    /// claimed the role concurrently the insert is retried as an author.
    async fn insert(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        match self.repository.create_user(new_user.clone()).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::AdministratorAlreadyExists) => {
                let as_author = NewUser {
                    role: Role::Author,
                    ..new_user
                };
                self.repository
                    .create_user(as_author)
                    .await
                    .map_err(map_repository_error)
            }
            Err(e) => Err(map_repository_error(e)),
        }
    }
}

fn map_repository_error(e: UserRepositoryError) -> CreateUserError {
    match e {
        UserRepositoryError::UserAlreadyExists => CreateUserError::EmailAlreadyExists,
        other => CreateUserError::RepositoryError(other.to_string()),
    }
}

#[async_trait]
impl ICreateUserUseCase for CreateUserUseCase {
    async fn execute(&self, request: RegisterRequest) -> Result<CreateUserOutput, CreateUserError> {
        let existing = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let role = if self
            .query
            .administrator_exists()
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?
        {
            Role::Author
        } else {
            Role::Administrator
        };

        let token = self.token_service.mint();
        let confirmation_token = token.value().to_string();

        let user = self
            .insert(NewUser {
                name: request.name().to_string(),
                email: request.email().to_string(),
                password_hash,
                avatar_url: DEFAULT_AVATAR_URL.to_string(),
                role,
                token,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(CreateUserOutput {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            confirmation_token,
        })
    }
}
