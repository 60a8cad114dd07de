use std::sync::Arc;

use actix_web::web;

use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    confirm_email::IConfirmEmailUseCase, fetch_profile::IFetchProfileUseCase,
    login_user::ILoginUserUseCase, logout_user::ILogoutUseCase,
    request_password_reset::IRequestPasswordResetUseCase,
    resend_confirmation::IResendConfirmationUseCase, reset_password::IResetPasswordUseCase,
    update_profile::IUpdateProfileUseCase,
};
use crate::blog::application::blog_use_cases::BlogUseCases;
use crate::contact::application::use_cases::send_contact_message::ISendContactMessageUseCase;
use crate::tests::support::in_memory_blog_store::InMemoryBlogStore;
use crate::tests::support::stubs::*;
use crate::AppState;

pub struct TestAppStateBuilder {
    register_user: Arc<UserRegistrationOrchestrator>,
    resend_confirmation: Arc<dyn IResendConfirmationUseCase + Send + Sync>,
    confirm_email: Arc<dyn IConfirmEmailUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    logout_user: Arc<dyn ILogoutUseCase + Send + Sync>,
    request_password_reset: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    reset_password: Arc<dyn IResetPasswordUseCase + Send + Sync>,
    fetch_profile: Arc<dyn IFetchProfileUseCase + Send + Sync>,
    update_profile: Arc<dyn IUpdateProfileUseCase + Send + Sync>,
    send_contact_message: Arc<dyn ISendContactMessageUseCase + Send + Sync>,
    blog: BlogUseCases,
}

pub fn default_test_user_registration_orchestrator() -> Arc<UserRegistrationOrchestrator> {
    Arc::new(UserRegistrationOrchestrator::new(
        Arc::new(StubCreateUserUseCase),
        Arc::new(RecordingNotifier::default()),
    ))
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user: default_test_user_registration_orchestrator(),
            resend_confirmation: Arc::new(StubResendConfirmationUseCase),
            confirm_email: Arc::new(StubConfirmEmailUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            logout_user: Arc::new(StubLogoutUserUseCase),
            request_password_reset: Arc::new(StubRequestPasswordResetUseCase),
            reset_password: Arc::new(StubResetPasswordUseCase),
            fetch_profile: Arc::new(StubFetchProfileUseCase),
            update_profile: Arc::new(StubUpdateProfileUseCase),
            send_contact_message: Arc::new(StubSendContactMessageUseCase),
            blog: blog_use_cases_for(
                &InMemoryBlogStore::new(),
                Arc::new(FixedImageHost::default()),
            ),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user_orchestrator(
        mut self,
        orchestrator: UserRegistrationOrchestrator,
    ) -> Self {
        self.register_user = Arc::new(orchestrator);
        self
    }

    pub fn with_resend_confirmation(
        mut self,
        uc: impl IResendConfirmationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.resend_confirmation = Arc::new(uc);
        self
    }

    pub fn with_confirm_email(
        mut self,
        uc: impl IConfirmEmailUseCase + Send + Sync + 'static,
    ) -> Self {
        self.confirm_email = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_logout_user(mut self, uc: impl ILogoutUseCase + Send + Sync + 'static) -> Self {
        self.logout_user = Arc::new(uc);
        self
    }

    pub fn with_request_password_reset(
        mut self,
        uc: impl IRequestPasswordResetUseCase + Send + Sync + 'static,
    ) -> Self {
        self.request_password_reset = Arc::new(uc);
        self
    }

    pub fn with_reset_password(
        mut self,
        uc: impl IResetPasswordUseCase + Send + Sync + 'static,
    ) -> Self {
        self.reset_password = Arc::new(uc);
        self
    }

    pub fn with_fetch_profile(
        mut self,
        uc: impl IFetchProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.fetch_profile = Arc::new(uc);
        self
    }

    pub fn with_update_profile(
        mut self,
        uc: impl IUpdateProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.update_profile = Arc::new(uc);
        self
    }

    pub fn with_send_contact_message(
        mut self,
        uc: impl ISendContactMessageUseCase + Send + Sync + 'static,
    ) -> Self {
        self.send_contact_message = Arc::new(uc);
        self
    }

    /// Blog services backed by `store`, uploading through [`FixedImageHost`].
    pub fn with_blog_store(mut self, store: &InMemoryBlogStore) -> Self {
        self.blog = blog_use_cases_for(store, Arc::new(FixedImageHost::default()));
        self
    }

    pub fn with_blog(mut self, blog: BlogUseCases) -> Self {
        self.blog = blog;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_orchestrator: self.register_user,
            resend_confirmation_use_case: self.resend_confirmation,
            confirm_email_use_case: self.confirm_email,
            login_user_use_case: self.login_user,
            logout_user_use_case: self.logout_user,
            request_password_reset_use_case: self.request_password_reset,
            reset_password_use_case: self.reset_password,
            fetch_profile_use_case: self.fetch_profile,
            update_profile_use_case: self.update_profile,
            send_contact_message_use_case: self.send_contact_message,
            blog: self.blog,
        })
    }
}
