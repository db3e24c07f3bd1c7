//! Logging utilities for hadley.
//!
//! Scale corrections are advisory, never fatal, so the classifier leans on
//! structured logging to keep every automatic adjustment auditable.

use std::time::Instant;
use tracing::{debug, error, info};

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, "Starting operation");

    let result = f();

    info!(
        operation = operation,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log an error with context
pub fn log_error(error: &crate::error::HadleyError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}
