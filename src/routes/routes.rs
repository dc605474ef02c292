//! Defines the HTTP surface.
//!
//! ## Structure
//! - `GET /`          — product listing with a signed banner link
//! - `GET /healthz`   — liveness
//! - `GET /readyz`    — database readiness
//! - `GET /static/*`  — read-only files from the configured static directory

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        index_handlers::index,
    },
    state::AppState,
};
use axum::{Router, routing::get};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build and return the application router.
///
/// The router carries shared state (`AppState`) to all handlers; static files
/// bypass it entirely.
pub fn routes(static_dir: impl AsRef<Path>) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
