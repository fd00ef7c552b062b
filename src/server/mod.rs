//! HTTP surface: `POST /recap` and `GET /health`.

pub mod handlers;

use crate::config::AppConfig;
use crate::core::engine::RecapEngine;
use crate::utils::error::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Upper bound for a request body, cover photos included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared across handlers. The engine is read-only, so requests never contend.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecapEngine>,
}

impl AppState {
    pub fn new(engine: RecapEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/recap", post(handlers::recap))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // The scanner web client calls from another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let engine = RecapEngine::from_config(config)?;
    let app = build_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
