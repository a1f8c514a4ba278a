use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Process-level failure surfaced by the service entry points.
///
/// Request-scoped failures never reach this type; they are rendered by the
/// marketplace router as JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
