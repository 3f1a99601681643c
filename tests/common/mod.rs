/// Common test utilities for integration tests
use axum_test::TestServer;

use reqmon::{build_router, config::Config, metrics::AppMetrics, state::AppState};

/// Fresh application state with its own metrics registry.
pub fn test_state() -> AppState {
    let metrics = AppMetrics::new().expect("Failed to register metrics");
    AppState::new(Config { api_port: 0 }, metrics)
}

/// In-process test server plus a handle on its state, so tests can read
/// metric values directly.
pub fn test_server() -> (TestServer, AppState) {
    let state = test_state();
    let server = TestServer::new(build_router(state.clone())).expect("Failed to start test server");
    (server, state)
}
