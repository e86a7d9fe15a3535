//! Wersmatch Web Service
//!
//! Accepts a feature-code spreadsheet, a Word document, and a VOCI mapping
//! spreadsheet, and renders the matched (feature code, sales code) pairs.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    serve, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use wersmatch_utils::{init_logging, AppConfig};

mod handlers;
mod storage;
mod templates;

use storage::UploadStore;
use templates::TemplateEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting Wersmatch Web Service");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let app = create_app(&config);

    let listener = TcpListener::bind(&addr).await?;
    info!("Wersmatch Web Service listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(config: &AppConfig) -> Router {
    let state = AppState {
        store: Arc::new(UploadStore::new(&config.uploads.dir)),
        templates: Arc::new(TemplateEngine::new()),
    };

    Router::new()
        .route("/", get(handlers::upload_form))
        .route("/upload", post(handlers::process_upload))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.server.max_request_size)),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UploadStore>,
    pub templates: Arc<TemplateEngine>,
}
