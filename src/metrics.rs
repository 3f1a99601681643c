//! Prometheus metrics for the request monitor.
//!
//! All metrics live in a single [`AppMetrics`] struct backed by its own
//! `prometheus::Registry`, created once at startup and shared through
//! `AppState`. Exposed on `/metrics` in text exposition format.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};
use sysinfo::{Pid, ProcessRefreshKind, System};

/// Paths exempted from request/response/latency instrumentation.
/// Memory gauges are still refreshed for these.
pub const EXCLUDED_PATHS: &[&str] = &["/favicon.ico", "/metrics"];

/// Whether a request path is exempt from request/response/latency metrics.
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATHS.contains(&path)
}

/// Application metric vectors plus the registry that owns them.
pub struct AppMetrics {
    registry: Registry,
    /// Requests by (method, path), incremented at entry.
    pub requests: IntCounterVec,
    /// Responses by (method, path, status_code), incremented at exit.
    pub responses: IntCounterVec,
    /// Wall-clock processing time by (method, path), in seconds.
    pub processing_time: HistogramVec,
    /// Process memory by type (rss, vms), overwritten on every request.
    pub memory_usage: IntGaugeVec,
}

impl AppMetrics {
    /// Create and register all metrics. Registration failures are fatal at
    /// startup; there is no recovery path at request time.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(
                "app_requests_total",
                "Total count of requests by method and path.",
            ),
            &["method", "path"],
        )?;

        let responses = IntCounterVec::new(
            Opts::new(
                "app_responses_total",
                "Total count of responses by method, path and status codes.",
            ),
            &["method", "path", "status_code"],
        )?;

        let processing_time = HistogramVec::new(
            HistogramOpts::new(
                "app_requests_processing_time_seconds",
                "Histogram of requests processing time by path (in seconds)",
            ),
            &["method", "path"],
        )?;

        let memory_usage = IntGaugeVec::new(
            Opts::new(
                "app_memory_usage_bytes",
                "Current memory usage of the application in bytes",
            ),
            &["type"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(responses.clone()))?;
        registry.register(Box::new(processing_time.clone()))?;
        registry.register(Box::new(memory_usage.clone()))?;

        Ok(Self {
            registry,
            requests,
            responses,
            processing_time,
            memory_usage,
        })
    }

    /// Sample current process RSS/VMS and overwrite the memory gauges.
    ///
    /// Skipped silently if the current process cannot be resolved.
    pub fn sample_memory(&self) {
        let pid = Pid::from_u32(std::process::id());
        let mut sys = System::new();
        if sys.refresh_process_specifics(pid, ProcessRefreshKind::new().with_memory()) {
            if let Some(proc) = sys.process(pid) {
                self.memory_usage
                    .with_label_values(&["rss"])
                    .set(proc.memory() as i64);
                self.memory_usage
                    .with_label_values(&["vms"])
                    .set(proc.virtual_memory() as i64);
            }
        }
    }

    /// Gather all registered metrics and encode them in text exposition format.
    pub fn gather(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %e, "Failed to encode Prometheus metrics");
            return String::new();
        }
        match String::from_utf8(buffer) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_paths() {
        assert!(is_excluded("/metrics"));
        assert!(is_excluded("/favicon.ico"));
        assert!(!is_excluded("/"));
        assert!(!is_excluded("/health"));
        assert!(!is_excluded("/random_sleep"));
        // Exclusion is literal, not prefix-based.
        assert!(!is_excluded("/metrics/"));
    }

    #[test]
    fn counters_start_empty_and_track_labels() {
        let metrics = AppMetrics::new().unwrap();

        metrics.requests.with_label_values(&["GET", "/"]).inc();
        metrics
            .responses
            .with_label_values(&["GET", "/", "200"])
            .inc();
        metrics
            .processing_time
            .with_label_values(&["GET", "/"])
            .observe(0.012);

        assert_eq!(metrics.requests.with_label_values(&["GET", "/"]).get(), 1);
        assert_eq!(
            metrics
                .responses
                .with_label_values(&["GET", "/", "200"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .processing_time
                .with_label_values(&["GET", "/"])
                .get_sample_count(),
            1
        );
    }

    #[test]
    fn gather_contains_touched_families() {
        let metrics = AppMetrics::new().unwrap();
        metrics
            .requests
            .with_label_values(&["GET", "/health"])
            .inc();
        metrics.sample_memory();

        let output = metrics.gather();
        assert!(output.contains("app_requests_total"));
        assert!(output.contains("app_memory_usage_bytes"));
        assert!(output.contains("method=\"GET\""));
        assert!(output.contains("path=\"/health\""));
    }

    #[test]
    fn memory_sample_sets_both_gauges() {
        let metrics = AppMetrics::new().unwrap();
        metrics.sample_memory();

        let rss = metrics.memory_usage.with_label_values(&["rss"]).get();
        let vms = metrics.memory_usage.with_label_values(&["vms"]).get();
        assert!(rss > 0, "rss should be positive, got {rss}");
        assert!(vms > 0, "vms should be positive, got {vms}");
        // Gauges overwrite rather than accumulate.
        metrics.sample_memory();
        let rss2 = metrics.memory_usage.with_label_values(&["rss"]).get();
        assert!(rss2 < rss * 2);
    }
}
