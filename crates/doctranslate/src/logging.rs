//! Process-wide tracing setup for the binary.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to bridge log records into tracing: {0}")]
    LogBridge(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Filter used when `RUST_LOG` is not set: our crate at `level`, others at warn.
pub fn default_filter(level: &str) -> String {
    format!("warn,doctranslate={}", level)
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = default_filter(level);
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive,
        message: e.to_string(),
    })
}

/// Installs the global subscriber and routes `log` macros through it.
///
/// Can only succeed once per process.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(fmt::layer().with_target(false)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_current_span(true))),
    };

    let subscriber = Registry::default().with(filter).with(pretty).with(json);

    tracing_log::LogTracer::init().map_err(|e| LoggingError::LogBridge(e.to_string()))?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(())
}
