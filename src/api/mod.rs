//! REST API around the estimator.
//!
//! One computational endpoint plus a few read-only ones:
//! - `/estimate`: JSON report for the baseline merged with query overrides
//! - `/` and `/index.html`: the dashboard page
//! - `/assets/*`: static files
//! - anything else: plain-text usage help

mod handlers;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::EstimatorConfig;

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; handlers only read it, so no
/// locks are needed.
pub struct AppState {
    /// Configuration every request starts from before overrides.
    pub baseline: EstimatorConfig,
    /// Dashboard HTML file served at `/`.
    pub frontend_path: PathBuf,
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
}

impl AppState {
    /// State with the default `public/index.html` and `assets/` locations.
    pub fn new(baseline: EstimatorConfig) -> Self {
        Self {
            baseline,
            frontend_path: PathBuf::from("public").join("index.html"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    let assets = ServeDir::new(&state.assets_dir);

    Router::new()
        .route("/", get(handlers::frontend))
        .route("/index.html", get(handlers::frontend))
        .route(
            "/estimate",
            get(handlers::estimate)
                .layer(cors)
                .layer(middleware::map_response(handlers::preflight_status)),
        )
        .nest_service("/assets", assets)
        .fallback(handlers::help)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to the given address and serves the API until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the server
/// fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "PV savings server (no export) listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = terminate => {}, }
    info!("shutdown signal received");
}
