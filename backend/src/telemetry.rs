//! Tracing subscriber bootstrap for binaries and tests embedding this crate.

use tracing_subscriber::{EnvFilter, fmt};

/// Failure to install the global tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tracing init failed: {message}")]
pub struct TelemetryError {
    message: String,
}

/// Install a JSON `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns an error instead of panicking when a global subscriber is already
/// set, so callers can log a warning and carry on.
pub fn init_tracing() -> Result<(), TelemetryError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
        .map_err(|err| TelemetryError {
            message: err.to_string(),
        })
}
