use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

/// GET /metrics - snapshot of every registered metric in Prometheus text
/// exposition format. Read-only; listed in the excluded-path set so it does
/// not instrument itself.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        state.metrics.gather(),
    )
}
