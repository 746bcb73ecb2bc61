// Structured logging setup
use error_common::{ReporterError, Result};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install a JSON `tracing` subscriber for the reporter crates.
///
/// `RUST_LOG` overrides the default filter.
///
/// # Errors
///
/// Returns [`ReporterError::Configuration`] if a global subscriber is
/// already installed.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "error_reporter={level},report_decision={level},report_scrubber={level},auth_identity={level}"
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .json(),
        )
        .try_init()
        .map_err(|e| ReporterError::Configuration(format!("Tracing init failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // The first call may lose to another test's subscriber; the second never wins
        let _ = init_tracing(true);
        assert!(matches!(init_tracing(false), Err(ReporterError::Configuration(_))));
    }
}
