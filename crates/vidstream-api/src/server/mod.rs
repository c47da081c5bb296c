//! Server setup and initialization
//!
//! Wires the configuration, database pool, repositories and services
//! together and runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use vidstream_common::{AppConfig, AppError, DiskMediaStore, JwtService};
use vidstream_core::SnowflakeGenerator;
use vidstream_db::{
    create_pool, run_migrations, PgBlogRepository, PgCommentRepository, PgPlaylistRepository,
    PgReactionRepository, PgTweetRepository, PgUserRepository, PgVideoRepository,
};
use vidstream_service::ServiceContextBuilder;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete axum application with all routes and middleware
///
/// Health probes are merged after the middleware stack so they bypass
/// the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        &config.media,
        config.app.env.is_production(),
    );

    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create the shared state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = vidstream_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        statement_timeout: std::time::Duration::from_millis(config.database.statement_timeout_ms),
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let media_store = Arc::new(DiskMediaStore::new(&config.media));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let video_repo = Arc::new(PgVideoRepository::new(pool.clone()));
    let tweet_repo = Arc::new(PgTweetRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));
    let blog_repo = Arc::new(PgBlogRepository::new(pool.clone()));
    let playlist_repo = Arc::new(PgPlaylistRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .video_repo(video_repo)
        .tweet_repo(tweet_repo)
        .comment_repo(comment_repo)
        .blog_repo(blog_repo)
        .playlist_repo(playlist_repo)
        .reaction_repo(reaction_repo)
        .media_store(media_store)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(Arc::new(service_context), Arc::new(config)))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
