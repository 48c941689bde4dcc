//! API route configuration.

use crate::api::handlers::{health_handler, long_url_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public API routes.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short URL
/// - `POST /get-long-url`  - Resolve a short URL (sent in the `long_url` field)
/// - `GET  /health`        - Storage health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/get-long-url", post(long_url_handler))
        .route("/health", get(health_handler))
}
