// Library interface for reqmon - exposes modules for testing

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use state::AppState;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// Route order does not matter; the monitor middleware wraps every route,
/// including axum's fallback, so unmatched paths are instrumented as 404s.
/// Trailing-slash variants are not auto-redirected.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Endpoints
        .route("/", get(handlers::root::root))
        .route("/random_sleep", get(handlers::sleep::random_sleep))
        .route("/health", get(handlers::health::health_check))
        // Metrics
        .route("/metrics", get(handlers::metrics::metrics_handler))
        // State
        .with_state(state.clone())
        // Middleware
        .layer(from_fn_with_state(state, middleware::monitor_requests))
        .layer(TraceLayer::new_for_http())
}
