//! Data service for the university startup board.
//!
//! The board itself is a static page. Everything it persists goes through one endpoint pair backed by JSON files,
//! see [`store`].
//!
//!
//!
//! # Endpoints
//!
//! - `GET /api/data?key=<collection>`: the stored collection, `[]` if it was never written
//! - `POST /api/data` with `{"key": "<collection>", "data": <any json>}`: replaces the collection
//! - `GET /`: `UniStartupBoard.html` from the static directory
//! - anything else: static files from the static directory
//!
//!
//!
//! # Notes
//!
//! ## Writes
//! Whole-collection replace, last writer wins. Fine for a single board admin and a handful of seeding scripts,
//! not meant for concurrent editors.
//!
//! ## Domain index
//! `data/domain_index.json` is produced by the `process` batch job and read by the page as the `domain_index`
//! collection. Nothing here writes to it.
//!
//!
//!
//! # Setup
//!
//! Environment, all optional.
//! ```sh
//! RUST_PORT=3001 DATA_DIR=data STATIC_DIR=. RUST_LOG=info cargo run -p server
//! ```
//!
//! Seed users and posts into a running server.
//! ```sh
//! PORT=3001 cargo run -p upsert
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use routes::{get_data_handler, post_data_handler};
use state::AppState;

pub const INDEX_PAGE: &str = "UniStartupBoard.html";

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let static_dir = &state.config.static_dir;

    Router::new()
        .route("/api/data", get(get_data_handler).post(post_data_handler))
        .route_service("/", ServeFile::new(static_dir.join(INDEX_PAGE)))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;
    info!("Collections stored in {}", state.store.dir().display());

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
