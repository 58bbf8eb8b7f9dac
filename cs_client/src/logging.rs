//! Structured logging configuration.
//!
//! The line-mode client logs to stderr. The TUI owns the terminal, so it
//! logs to a file instead. Records emitted through `log` by the `car_store`
//! library are bridged into the same subscriber.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Requests slower than this are logged as warnings
const SLOW_REQUEST_MS: u64 = 1000;

/// Initialize logging
///
/// # Arguments
///
/// * `log_file` - Write to this file instead of stderr
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a subscriber is
/// already installed
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (console_layer, file_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .boxed();
            (Some(layer), None)
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("Logging initialized");
    Ok(())
}

/// Log a completed backend request
///
/// # Arguments
///
/// * `method` - HTTP method
/// * `path` - Request path
/// * `status_code` - Response status code
/// * `duration_ms` - Request duration in milliseconds
pub fn log_api_request(method: &str, path: &str, status_code: u16, duration_ms: u64) {
    if duration_ms > SLOW_REQUEST_MS {
        tracing::warn!(
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "Slow API request"
        );
    } else {
        tracing::debug!(
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "API request completed"
        );
    }
}

/// Log a backend request that never got a response
pub fn log_api_failure(method: &str, path: &str, duration_ms: u64, error: &str) {
    tracing::warn!(
        http_method = method,
        http_path = path,
        duration_ms = duration_ms,
        error = error,
        "API request failed"
    );
}
