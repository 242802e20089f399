/*!
 * Logging and tracing initialization
 */

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{ConnectorError, Result};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable compact output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Initialize structured logging
///
/// The filter defaults to `osconnect=info` (`debug` when `verbose` is set)
/// and can be overridden with `RUST_LOG`.
pub fn init_logging(verbose: bool, format: LogFormat) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("osconnect={}", log_level)))
        .map_err(|e| ConnectorError::InvalidConfig {
            message: format!("failed to create log filter: {}", e),
        })?;

    match format {
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE)
                .compact();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_span_events(FmtSpan::NONE)
                .with_ansi(false)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
    }

    Ok(())
}

/// Initialize logging with test writer, once per process
#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("osconnect=debug"));

        let fmt_layer = fmt::layer().with_test_writer().with_target(false).compact();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .ok(); // Ignore error if already initialized
    });
}
