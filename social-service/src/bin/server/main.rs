use std::sync::Arc;

use auth::TokenCodec;
use social_service::config::Config;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::outbound::notifications::LoggingConfirmationMailer;
use social_service::outbound::repositories::PostgresPostRepository;
use social_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    social_service::telemetry::init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        confirm_token_expire_minutes = config.jwt.confirm_token_expire_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = Arc::new(TokenCodec::with_lifetimes(
        config.jwt.secret.as_bytes(),
        config.jwt.lifetimes(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));
    let mailer = Arc::new(LoggingConfirmationMailer::new());

    let user_service = Arc::new(UserService::new(
        user_repository,
        mailer,
        token_codec,
        config.server.public_url.clone(),
    ));
    let post_service = Arc::new(PostService::new(post_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, post_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
