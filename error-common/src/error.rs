use thiserror::Error;

/// Failures of the reporting pipeline itself
#[derive(Error, Debug)]
pub enum ReporterError {
    /// The remote error-tracking client failed to accept the report
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Wrapped external errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for reporting operations
pub type Result<T> = std::result::Result<T, ReporterError>;
