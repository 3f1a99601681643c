//! Request-monitoring middleware.
//!
//! Wraps every request: samples process memory, then (for non-excluded
//! paths) counts the request, times the downstream handler and counts the
//! response by status code. The continuation is never caught or retried; a
//! panicking handler propagates without reaching the exit-side metrics.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::is_excluded;
use crate::state::AppState;

pub async fn monitor_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    // Memory gauges are refreshed for every request, excluded paths included.
    state.metrics.sample_memory();

    if is_excluded(&path) {
        return next.run(request).await;
    }

    state
        .metrics
        .requests
        .with_label_values(&[&method, &path])
        .inc();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status_code = response.status().as_u16().to_string();
    state
        .metrics
        .responses
        .with_label_values(&[&method, &path, &status_code])
        .inc();
    state
        .metrics
        .processing_time
        .with_label_values(&[&method, &path])
        .observe(elapsed);

    response
}
