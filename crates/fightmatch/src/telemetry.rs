use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: [&str; 2] = ["fightmatch", "fightmatch_cli"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => {
                write!(f, "FIGHTMATCH_LOG_LEVEL '{value}' is not a valid level or filter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the stderr subscriber so JSON on stdout stays clean.
///
/// `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// A bare level applies to the engine and CLI crates only; anything else is a full directive.
fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let level = log_level.trim();
    let directive = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        let scoped: Vec<String> = CRATE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect();
        format!("warn,{}", scoped.join(","))
    };

    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::InvalidFilter {
        value: log_level.to_string(),
        source,
    })
}
