//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check (JSON)
//! - `/static/*`          - Static assets
//! - everything else      - Web pages, see [`crate::web::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on web pages
//! - **Sessions** - Signed cookie resolved to the current user
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// Trailing slashes are trimmed before routing, so the normalized service is
/// mounted as the fallback of an otherwise empty router.
pub fn app_router(state: AppState, behind_proxy: bool) -> Router {
    let web_router = rate_limit::apply(web::routes::router(state.clone()), behind_proxy);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer());

    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}
