//! Tagfeed API Server
//!
//! Tag-filtered post feeds over a hosted, schema-only backend.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgrestClient;
use app::{FeedService, PostService, ProfileService, TagService};
use config::Config;
use domain::ports::{QueryClient, SessionVerifier};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService<dyn QueryClient>>,
    pub tag_service: Arc<TagService<dyn QueryClient>>,
    pub post_service: Arc<PostService<dyn QueryClient>>,
    pub profile_service: Arc<ProfileService<dyn QueryClient>>,
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn QueryClient>, sessions: Arc<dyn SessionVerifier>) -> Self {
        Self {
            feed_service: Arc::new(FeedService::new(store.clone())),
            tag_service: Arc::new(TagService::new(store.clone())),
            post_service: Arc::new(PostService::new(store.clone())),
            profile_service: Arc::new(ProfileService::new(store)),
            sessions,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with every route and layer attached
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public catalog
        .route("/tags", get(handlers::list_tags))
        .route("/posts", get(handlers::list_posts))
        .route("/posts/:id", get(handlers::get_post))
        .route("/feed/tags", get(handlers::get_tag_feed))
        // Reader-scoped routes
        .merge(
            Router::new()
                .route("/posts", post(handlers::create_post))
                .route("/me", get(handlers::get_me))
                .route("/me/posts", get(handlers::list_my_posts))
                .route("/me/bookmarks", get(handlers::list_bookmarks))
                .route("/me/feed", get(handlers::get_personalised_feed))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::session_middleware,
                )),
        )
        // Middleware (outermost first)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tagfeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting tagfeed API...");

    // Load configuration
    let config = Config::from_env()?;

    // Create adapters
    let backend = Arc::new(
        PostgrestClient::new(
            config.backend_url.clone(),
            config.backend_api_key.clone(),
            config.backend_timeout,
        )
        .context("Failed to build backend client")?,
    );
    tracing::info!(backend = %config.backend_url, "Backend client ready");

    let state = AppState::new(backend.clone(), backend);
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
