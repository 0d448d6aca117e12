//! Common routes: health and database diagnostics.

use super::limited;
use crate::handlers::system::{health, test_db};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /health, GET /test-db (diagnostic limiter).
pub fn common_routes(state: AppState) -> Router {
    let diagnostic = state.limits.diagnostic.clone();
    Router::new()
        .route("/health", get(health))
        .route("/test-db", limited(get(test_db), &diagnostic))
        .with_state(state)
}
