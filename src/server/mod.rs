// src/server/mod.rs
//! HTTP collaborator: serves page Markdown, accepts background images and
//! hosts the built front-end.

mod error;
mod handlers;

pub use error::{ErrorBody, ServerError};
pub use handlers::{BackgroundResponse, PageQuery, MISSING_BUILD_MESSAGE};

use crate::api::NotionHttpClient;
use crate::config::ServeConfig;
use crate::constants::BACKGROUND_MAX_BYTES;
use crate::error::AppError;
use crate::pipeline::MarkdownPipeline;
use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and headers around the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Absent when no credential is configured.
    pub pipeline: Option<MarkdownPipeline>,
    pub default_page: Option<String>,
    pub public_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub fetch_timeout: Duration,
}

impl AppState {
    /// Builds the state for `serve`, connecting to the configured API.
    pub fn new(config: &ServeConfig) -> Result<Self, AppError> {
        let pipeline = match &config.api_key {
            Some(key) => {
                let client = NotionHttpClient::with_base_url(key, &config.api_base_url)?;
                Some(MarkdownPipeline::new(Arc::new(client)))
            }
            None => None,
        };

        Ok(Self {
            pipeline,
            default_page: config.default_page.clone(),
            public_dir: config.public_dir.clone(),
            dist_dir: config.dist_dir.clone(),
            fetch_timeout: config.fetch_timeout,
        })
    }
}

/// Build the axum router.
///
/// Unmatched paths resolve against the public directory, then the
/// front-end build, then the front-end's `index.html`.
pub fn router(state: AppState) -> Router {
    let index = state.dist_dir.join("index.html");
    let spa = (move || handlers::spa_index(index.clone())).into_service();
    let static_files =
        ServeDir::new(&state.public_dir).fallback(ServeDir::new(&state.dist_dir).fallback(spa));

    Router::new()
        .route("/api/page-content", get(handlers::page_content))
        .route(
            "/api/background",
            post(handlers::upload_background)
                .layer(DefaultBodyLimit::max(BACKGROUND_MAX_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until interrupted.
pub async fn run(state: AppState, addr: SocketAddr) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&state.public_dir).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("cannot bind {}: {}", addr, e)))?;
    log::info!("Server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
