use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::{HashError, PasswordHasher};
use crate::auth::application::services::TokenService;
use crate::auth::application::use_cases::confirm_email::{
    ConfirmEmailError, ConfirmEmailOutput, IConfirmEmailUseCase,
};
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase, RegisterRequest,
};
use crate::auth::application::use_cases::fetch_profile::{
    FetchProfileError, IFetchProfileUseCase, ProfileView,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::logout_user::{
    ILogoutUseCase, LogoutError, LogoutRequest, LogoutResponse,
};
use crate::auth::application::use_cases::request_password_reset::{
    IRequestPasswordResetUseCase, RequestPasswordResetError,
};
use crate::auth::application::use_cases::resend_confirmation::{
    EmailOnlyRequest, IResendConfirmationUseCase, ResendConfirmationError,
};
use crate::auth::application::use_cases::reset_password::{
    IResetPasswordUseCase, ResetPasswordCommand, ResetPasswordError, ResetTokenInfo,
};
use crate::auth::application::use_cases::update_profile::{
    IUpdateProfileUseCase, UpdateProfileError, UpdateProfileRequest,
};
use crate::auth::application::domain::entities::UserId;
use crate::blog::application::blog_use_cases::BlogUseCases;
use crate::blog::application::service::{
    AddCommentService, CreatePostService, DeleteCommentService, DeletePostService,
    EditPostService, GetPostService, ListPostsService,
};
use crate::contact::application::use_cases::send_contact_message::{
    ContactRequest, ISendContactMessageUseCase, SendContactMessageError,
};
use crate::email::application::ports::outgoing::{UserEmailNotificationError, UserEmailNotifier};
use crate::media::application::domain::entities::{ImageTransform, ImageUpload};
use crate::media::application::ports::outgoing::{ImageHost, ImageHostError};
use crate::tests::support::in_memory_blog_store::InMemoryBlogStore;
use crate::tests::support::in_memory_user_store::InMemoryUserStore;

// ──────────────────────────────────────────────────────────
// Collaborators
// ──────────────────────────────────────────────────────────

/// Reversible stand-in for a real hash so tests can assert on stored values.
#[derive(Default, Clone, Copy)]
pub struct PrefixHasher;

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

pub fn token_service_for(store: &Arc<InMemoryUserStore>) -> TokenService {
    TokenService::new(store.clone(), store.clone(), chrono::Duration::hours(24))
}

/// Records `(to, token)` pairs for every account mail sent.
#[derive(Default)]
pub struct RecordingNotifier {
    confirmations: Mutex<Vec<(String, String)>>,
    resets: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn confirmations(&self) -> Vec<(String, String)> {
        self.confirmations.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<(String, String)> {
        self.resets.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_confirmation_email(
        &self,
        to: &str,
        _name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.outcome()?;
        self.confirmations
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        to: &str,
        _name: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.outcome()?;
        self.resets
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }
}

/// Answers every upload with `https://img.example/uploads/<file name>`.
#[derive(Default)]
pub struct FixedImageHost {
    uploads: AtomicUsize,
    fail: bool,
}

impl FixedImageHost {
    pub fn failing() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for FixedImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        _transform: Option<ImageTransform>,
    ) -> Result<String, ImageHostError> {
        if self.fail {
            return Err(ImageHostError::UploadFailed("host unreachable".to_string()));
        }
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://img.example/uploads/{}", image.file_name()))
    }
}

/// Real blog services running against an in-memory store.
pub fn blog_use_cases_for(
    store: &InMemoryBlogStore,
    image_host: Arc<dyn ImageHost + Send + Sync>,
) -> BlogUseCases {
    BlogUseCases {
        list_posts: Arc::new(ListPostsService::new(store.clone())),
        get_post: Arc::new(GetPostService::new(store.clone())),
        create_post: Arc::new(CreatePostService::new(store.clone(), image_host.clone())),
        edit_post: Arc::new(EditPostService::new(
            store.clone(),
            store.clone(),
            image_host,
        )),
        delete_post: Arc::new(DeletePostService::new(store.clone(), store.clone())),
        add_comment: Arc::new(AddCommentService::new(store.clone())),
        delete_comment: Arc::new(DeleteCommentService::new(store.clone())),
    }
}

// ──────────────────────────────────────────────────────────
// Use case stubs
// ──────────────────────────────────────────────────────────

#[derive(Default, Clone)]
pub struct StubCreateUserUseCase;

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _request: RegisterRequest) -> Result<CreateUserOutput, CreateUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubResendConfirmationUseCase;

#[async_trait]
impl IResendConfirmationUseCase for StubResendConfirmationUseCase {
    async fn execute(&self, _request: EmailOnlyRequest) -> Result<(), ResendConfirmationError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubConfirmEmailUseCase;

#[async_trait]
impl IConfirmEmailUseCase for StubConfirmEmailUseCase {
    async fn execute(&self, _token: &str) -> Result<ConfirmEmailOutput, ConfirmEmailError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLogoutUserUseCase;

#[async_trait]
impl ILogoutUseCase for StubLogoutUserUseCase {
    async fn execute(&self, _request: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRequestPasswordResetUseCase;

#[async_trait]
impl IRequestPasswordResetUseCase for StubRequestPasswordResetUseCase {
    async fn execute(&self, _request: EmailOnlyRequest) -> Result<(), RequestPasswordResetError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn check_token(&self, _token: &str) -> Result<ResetTokenInfo, ResetPasswordError> {
        unimplemented!("Not used in this test")
    }

    async fn execute(&self, _command: ResetPasswordCommand) -> Result<(), ResetPasswordError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubFetchProfileUseCase;

#[async_trait]
impl IFetchProfileUseCase for StubFetchProfileUseCase {
    async fn execute(&self, _user_id: UserId) -> Result<ProfileView, FetchProfileError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubUpdateProfileUseCase;

#[async_trait]
impl IUpdateProfileUseCase for StubUpdateProfileUseCase {
    async fn execute(
        &self,
        _user_id: UserId,
        _request: UpdateProfileRequest,
    ) -> Result<ProfileView, UpdateProfileError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSendContactMessageUseCase;

#[async_trait]
impl ISendContactMessageUseCase for StubSendContactMessageUseCase {
    async fn execute(&self, _request: ContactRequest) -> Result<(), SendContactMessageError> {
        unimplemented!("Not used in this test")
    }
}
