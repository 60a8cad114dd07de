pub mod modules;
pub use modules::{auth, blog, contact, email, media};
pub mod api;
pub mod config;
pub mod health;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::session_revocation_redis::RedisSessionRevocationStore;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher, session_revocation::SessionRevocationStore,
    token_provider::TokenProvider, user_query::UserQuery, user_repository::UserRepository,
};
use crate::auth::application::services::token_service::TokenService;
use crate::auth::application::use_cases::{
    confirm_email::{ConfirmEmailUseCase, IConfirmEmailUseCase},
    create_user::{CreateUserUseCase, ICreateUserUseCase},
    fetch_profile::{FetchProfileUseCase, IFetchProfileUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    request_password_reset::{IRequestPasswordResetUseCase, RequestPasswordResetUseCase},
    resend_confirmation::{IResendConfirmationUseCase, ResendConfirmationUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    update_profile::{IUpdateProfileUseCase, UpdateProfileUseCase},
};
use crate::blog::adapter::outgoing::{
    CommentRepositoryPostgres, PostQueryPostgres, PostRepositoryPostgres,
};
use crate::blog::application::blog_use_cases::BlogUseCases;
use crate::blog::application::service::{
    AddCommentService, CreatePostService, DeleteCommentService, DeletePostService,
    EditPostService, GetPostService, ListPostsService,
};
use crate::config::{AppConfig, SmtpSettings};
use crate::contact::application::use_cases::send_contact_message::{
    ISendContactMessageUseCase, SendContactMessageUseCase,
};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::{
    email_sender::EmailSender, user_email_notifier::UserEmailNotifier,
};
use crate::email::application::services::UserEmailService;
use crate::media::adapter::outgoing::cloudinary::{CloudinaryConfig, CloudinaryImageHost};
use crate::media::application::ports::outgoing::image_host::ImageHost;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

/// Everything a request handler may call. Built once at start-up and shared
/// by every worker.
#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub resend_confirmation_use_case: Arc<dyn IResendConfirmationUseCase + Send + Sync>,
    pub confirm_email_use_case: Arc<dyn IConfirmEmailUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub request_password_reset_use_case: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase + Send + Sync>,
    pub fetch_profile_use_case: Arc<dyn IFetchProfileUseCase + Send + Sync>,
    pub update_profile_use_case: Arc<dyn IUpdateProfileUseCase + Send + Sync>,
    pub send_contact_message_use_case: Arc<dyn ISendContactMessageUseCase + Send + Sync>,
    pub blog: BlogUseCases,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    config::load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Redis TLS connections need a process-wide crypto provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let server_url = config.bind_address();

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&conn, None)
        .await
        .context("failed to run migrations")?;
    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&config.redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .context("failed to create Redis pool")?;
    let redis_arc = Arc::new(redis_pool);

    // Outgoing adapters
    let user_query: Arc<dyn UserQuery + Send + Sync> =
        Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let user_repo: Arc<dyn UserRepository + Send + Sync> =
        Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let revocation_store: Arc<dyn SessionRevocationStore + Send + Sync> =
        Arc::new(RedisSessionRevocationStore::new(Arc::clone(&redis_arc)));
    let token_provider: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(JwtConfig::from_env()?));
    let password_hasher: Arc<dyn PasswordHasher + Send + Sync> =
        Arc::new(Argon2Hasher::from_env()?);

    let email_sender: Arc<dyn EmailSender + Send + Sync> = match &config.smtp {
        SmtpSettings::Relay {
            server,
            username,
            password,
        } => Arc::new(SmtpEmailSender::new(
            server,
            username,
            password,
            &config.email_from,
        )?),
        SmtpSettings::Local { host, port } => {
            Arc::new(SmtpEmailSender::new_local(host, *port, &config.email_from))
        }
    };
    let notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(UserEmailService::new(
        Arc::clone(&email_sender),
        &config.app_base_url,
        config.account_token_ttl,
    ));
    let image_host: Arc<dyn ImageHost + Send + Sync> =
        Arc::new(CloudinaryImageHost::new(CloudinaryConfig::from_env()?)?);

    // Account tokens
    let token_service = TokenService::new(
        Arc::clone(&user_query),
        Arc::clone(&user_repo),
        config.account_token_ttl,
    );

    // User registration components
    let create_user_uc: Arc<dyn ICreateUserUseCase + Send + Sync> =
        Arc::new(CreateUserUseCase::new(
            Arc::clone(&user_query),
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            token_service.clone(),
        ));
    let register_user_orchestrator =
        UserRegistrationOrchestrator::new(create_user_uc, Arc::clone(&notifier));

    let blog = BlogUseCases {
        list_posts: Arc::new(ListPostsService::new(PostQueryPostgres::new(Arc::clone(
            &db_arc,
        )))),
        get_post: Arc::new(GetPostService::new(PostQueryPostgres::new(Arc::clone(
            &db_arc,
        )))),
        create_post: Arc::new(CreatePostService::new(
            PostRepositoryPostgres::new(Arc::clone(&db_arc)),
            Arc::clone(&image_host),
        )),
        edit_post: Arc::new(EditPostService::new(
            PostQueryPostgres::new(Arc::clone(&db_arc)),
            PostRepositoryPostgres::new(Arc::clone(&db_arc)),
            Arc::clone(&image_host),
        )),
        delete_post: Arc::new(DeletePostService::new(
            PostQueryPostgres::new(Arc::clone(&db_arc)),
            PostRepositoryPostgres::new(Arc::clone(&db_arc)),
        )),
        add_comment: Arc::new(AddCommentService::new(CommentRepositoryPostgres::new(
            Arc::clone(&db_arc),
        ))),
        delete_comment: Arc::new(DeleteCommentService::new(CommentRepositoryPostgres::new(
            Arc::clone(&db_arc),
        ))),
    };

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        resend_confirmation_use_case: Arc::new(ResendConfirmationUseCase::new(
            Arc::clone(&user_query),
            token_service.clone(),
            Arc::clone(&notifier),
        )),
        confirm_email_use_case: Arc::new(ConfirmEmailUseCase::new(token_service.clone())),
        login_user_use_case: Arc::new(LoginUserUseCase::new(
            Arc::clone(&user_query),
            Arc::clone(&password_hasher),
            Arc::clone(&token_provider),
        )),
        logout_user_use_case: Arc::new(LogoutUseCase::new(
            Arc::clone(&revocation_store),
            Arc::clone(&token_provider),
        )),
        request_password_reset_use_case: Arc::new(RequestPasswordResetUseCase::new(
            Arc::clone(&user_query),
            token_service.clone(),
            Arc::clone(&notifier),
        )),
        reset_password_use_case: Arc::new(ResetPasswordUseCase::new(
            token_service,
            password_hasher,
        )),
        fetch_profile_use_case: Arc::new(FetchProfileUseCase::new(Arc::clone(&user_query))),
        update_profile_use_case: Arc::new(UpdateProfileUseCase::new(
            user_query,
            user_repo,
            image_host,
        )),
        send_contact_message_use_case: Arc::new(SendContactMessageUseCase::new(
            email_sender,
            &config.site_owner_email,
        )),
        blog,
    };

    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&revocation_store)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(crate::shared::api::custom_json_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::resend_confirmation_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::confirm_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::request_password_reset_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::check_reset_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::reset_password_handler);
    // Users
    cfg.service(crate::auth::adapter::incoming::web::routes::fetch_profile_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::update_profile_handler);
    // Blog
    cfg.service(crate::blog::adapter::incoming::web::routes::list_posts_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::get_post_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::create_post_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::edit_post_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::delete_post_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::add_comment_handler);
    cfg.service(crate::blog::adapter::incoming::web::routes::delete_comment_handler);
    // Contact
    cfg.service(crate::contact::adapter::incoming::web::routes::send_contact_message_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
