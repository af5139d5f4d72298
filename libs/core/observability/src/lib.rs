//! Observability utilities for the users service.
//!
//! - Prometheus metrics recording and export
//! - User operation metrics
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, UserMetrics};
//!
//! init_metrics();
//! UserMetrics::record_created();
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod users;

pub use middleware::metrics_middleware;
pub use users::UserMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{error, info};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Idempotent. If a global recorder is already installed (another test or
/// library got there first) a detached handle is kept so `/metrics` still
/// renders.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let handle = match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder initialized");
                handle
            }
            Err(e) => {
                error!(error = %e, "Failed to install Prometheus recorder");
                PrometheusBuilder::new().build_recorder().handle()
            }
        };

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (None until [`init_metrics`] runs)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for the /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // User metrics
    describe_counter!(
        "user_operations_total",
        "User operations by operation and outcome"
    );
    describe_gauge!("users_total", "Number of users after the last collection read");
}
