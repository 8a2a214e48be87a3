//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

use crate::config::SuiteConfig;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured log level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the filter applied to the fmt layer: warnings from dependencies,
/// the configured level for this crate.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the configured level does not
/// parse.
pub fn env_filter(config: &SuiteConfig) -> Result<EnvFilter, TelemetryError> {
    let directives = format!("warn,taskdeck={level}", level = config.log_level);
    Ok(EnvFilter::try_new(directives)?)
}

/// Installs a global `fmt` subscriber filtered per [`env_filter`].
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a global
/// subscriber is already set.
pub fn init_tracing(config: &SuiteConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .try_init()?;
    Ok(())
}
