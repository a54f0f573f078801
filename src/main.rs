//! Study Resources Backend
//!
//! A REST backend for organizing learning material: topics with attached
//! articles, PDFs, YouTube links and structured video courses, with progress
//! tracking and pre-signed upload URLs. SQLite persistence, JWT auth.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod storage;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use storage::UploadUrlIssuer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub uploads: Arc<UploadUrlIssuer>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Study Resources Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.tokens.access_secret == config::DEV_TOKEN_SECRET
        || config.tokens.refresh_secret == config::DEV_TOKEN_SECRET
    {
        tracing::warn!(
            "Token secrets not configured (STUDY_ACCESS_TOKEN_SECRET / STUDY_REFRESH_TOKEN_SECRET). Using insecure dev defaults!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the upload URL issuer
    let uploads = Arc::new(UploadUrlIssuer::new(&config.storage));

    // Create application state
    let state = AppState {
        repo,
        uploads,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the access secret for the auth layer
    let access_secret = state.config.tokens.access_secret.clone();

    // Auth routes (no token required)
    let auth_routes = Router::new()
        .route("/auth/signup", post(api::signup))
        .route("/auth/login", post(api::login))
        .route("/auth/refresh", get(api::refresh_token));

    // Protected API routes
    let protected_routes = Router::new()
        // Topics
        .route("/topics", get(api::list_topics))
        .route("/topics", post(api::create_topic))
        .route("/topics/{id}", put(api::update_topic))
        .route("/topics/{id}", delete(api::delete_topic))
        // Articles
        .route("/articles", post(api::create_article))
        .route("/articles/topic/{topicId}", get(api::list_articles))
        .route("/articles/{id}", get(api::get_article))
        .route("/articles/{id}", put(api::update_article))
        .route("/articles/{id}", delete(api::delete_article))
        // Pdfs
        .route("/pdfs", post(api::create_pdf))
        .route("/pdfs/topic/{topicId}", get(api::list_pdfs))
        .route("/pdfs/{id}", get(api::get_pdf))
        .route("/pdfs/{id}", put(api::update_pdf))
        .route("/pdfs/{id}", delete(api::delete_pdf))
        // Youtube links
        .route("/youtube", post(api::create_youtube_link))
        .route("/youtube/topic/{topicId}", get(api::list_youtube_links))
        .route("/youtube/{id}", get(api::get_youtube_link))
        .route("/youtube/{id}", put(api::update_youtube_link))
        .route("/youtube/{id}", delete(api::delete_youtube_link))
        // Courses
        .route("/courses", post(api::create_course))
        .route("/courses/topic/{topicId}", get(api::list_courses))
        .route("/courses/{id}", get(api::get_course))
        .route("/courses/{id}", put(api::update_course))
        .route("/courses/{id}", delete(api::delete_course))
        .route("/courses/{id}/sections", put(api::add_sections_to_course))
        .route("/courses/{id}/last-watched", post(api::update_last_watched))
        .route("/sections/{id}", get(api::get_section))
        .route("/sections/{id}", put(api::update_section))
        .route("/videos/{id}", get(api::get_video))
        .route("/videos/{id}", put(api::update_video))
        // Upload URLs
        .route("/uploads", post(api::get_upload_urls))
        // Apply JWT auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::jwt_auth_layer(access_secret.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", auth_routes.merge(protected_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
