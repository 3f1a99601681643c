use crate::config::Config;
use crate::metrics::AppMetrics;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    pub fn new(config: Config, metrics: AppMetrics) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(metrics),
        }
    }
}
