//! Team Updates Backend
//!
//! REST backend for the robotics team website: a public listing of published
//! updates plus a token-gated admin CRUD surface over Postgres.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{Repository, UpdatesStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UpdatesStore>,
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

    tracing::info!("Starting team updates backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_user.is_none() || config.admin_password.is_none() {
        tracing::warn!(
            "Admin credentials not configured (ADMIN_USER / ADMIN_PASSWORD). Login will fail!"
        );
    }
    if config.jwt_secret.is_none() {
        tracing::warn!(
            "No token signing key configured (JWT_SECRET). Admin endpoints will reject every request!"
        );
    }

    // Initialize database
    let database_url = config
        .database_url
        .clone()
        .ok_or("DATABASE_URL must be set")?;
    let pool = db::init_database(&database_url, &config.database_ssl_mode).await?;
    let store: Arc<dyn UpdatesStore> = Arc::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        store,
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
    // CORS configuration for the browser admin UI
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the signing key for the auth layer
    let jwt_secret = state.config.jwt_secret.clone();

    // Admin routes, gated by the bearer-token middleware
    let admin_routes = Router::new()
        .route(
            "/admin/updates",
            get(api::list_all_updates)
                .post(api::create_update)
                .put(api::replace_update)
                .delete(api::delete_update),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::jwt_auth_layer(jwt_secret.clone(), req, next)
        }));

    // Public routes
    let public_routes = Router::new()
        .route("/login", post(api::login))
        .route("/updates", get(api::list_published_updates));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
