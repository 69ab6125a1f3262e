//! Tracing setup for the check-in service. The active filter comes from
//! `RUST_LOG` when set, otherwise from the configured `CHECKIN_LOG_LEVEL`
//! directive.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(
                    f,
                    "CHECKIN_LOG_LEVEL '{}' is not a valid tracing filter",
                    directive
                )
            }
            TelemetryError::Init(err) => {
                write!(f, "check-in tracing subscriber failed to install: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber for the check-in service. Call once at
/// startup, before any session traffic.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(config)?)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}

fn resolve_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        directive: config.log_level.clone(),
        source,
    })
}
