//! HTTP surface of the dashboard: the JSON API nested under `/api` and the
//! static single page served for everything else.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::config::MeteoMapConfig;
use crate::dashboard::Dashboard;

const REQUEST_BODY_LIMIT_BYTES: usize = 16 * 1024;
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Router-level timeout for one request.
///
/// A cycle calls the geocoding and forecast endpoints back to back, so the
/// router must outlast both configured upstream timeouts or a slow cycle
/// would be cut off with a 408 before its own clients give up.
fn request_timeout(config: &MeteoMapConfig) -> Duration {
    let upstream_seconds =
        u64::from(config.geocoding.timeout_seconds) + u64::from(config.weather.timeout_seconds);
    Duration::from_secs(upstream_seconds) + REQUEST_TIMEOUT_MARGIN
}

/// Assemble the application router
///
/// Kept separate from [`run`] so tests can drive the full surface without
/// binding a socket.
pub fn app(config: &MeteoMapConfig, dashboard: Arc<Dashboard>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(dashboard))
        .fallback_service(ServeDir::new(&config.server.frontend_dir))
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(request_timeout(config)))
        .layer(cors)
}

/// Serve the dashboard until the process is stopped
pub async fn run(config: MeteoMapConfig) -> Result<()> {
    let dashboard = Arc::new(Dashboard::new(&config)?);
    let app = app(&config, dashboard);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Dashboard running at http://localhost:{}", config.server.port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
