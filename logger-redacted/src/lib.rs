pub mod config;
pub mod error;
pub mod redactor;

pub use config::*;
pub use error::*;
pub use redactor::*;

use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Tracing setup for ClinicDesk binaries and tests.
///
/// Patient contact details (phone numbers, email addresses) must never be
/// written to logs verbatim. Components that log them pass the text through
/// [`PiiRedactor`] first; the redactor replaces each match with either a
/// short hash (so two log lines about the same patient can be correlated) or
/// a masked form that keeps the last digits for front-desk troubleshooting.
///
/// # Example
///
/// ```rust
/// use logger_redacted::{init_tracing, LoggerConfig, PiiRedactor, RedactionConfig};
///
/// init_tracing(&LoggerConfig::default())?;
///
/// let redactor = PiiRedactor::new(RedactionConfig::default());
/// tracing::info!(contact = %redactor.redact("+91 98765 43210"), "reminder queued");
/// # Ok::<(), logger_redacted::LoggerError>(())
/// ```
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| LoggerError::InvalidFilter(format!("{}: {}", config.log_level, e)))?,
    };

    let installed = if config.json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_level(true),
            )
            .try_init()
    };

    // A global subscriber can only be set once per process.
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggerConfig::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_ok());
    }
}
