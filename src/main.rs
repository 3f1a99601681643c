use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reqmon::config::Config;
use reqmon::metrics::AppMetrics;
use reqmon::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging with JSON formatting (configurable via env)
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reqmon=info,tower_http=info".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        service = "reqmon",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if use_json { "json" } else { "text" },
        "Starting service"
    );

    let config = Config::load()?;

    // Metric registration is fatal if it fails; there is no request-time recovery.
    let metrics = AppMetrics::new()?;
    let state = AppState::new(config, metrics);

    let app = reqmon::build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.api_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
