use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::matchmaking::policy::BALANCED;
use crate::matchmaking::{
    RecommendationLimits, DEFAULT_MAX_RECOMMENDATIONS, DEFAULT_MAX_SCREENED,
    DEFAULT_SCREENING_INACTIVITY_DAYS,
};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FIGHTMATCH_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_policy =
            env::var("FIGHTMATCH_POLICY").unwrap_or_else(|_| BALANCED.to_string());
        let policy_file = env::var("FIGHTMATCH_POLICY_FILE").ok().map(PathBuf::from);

        let limits = RecommendationLimits {
            max_recommendations: parse_var(
                "FIGHTMATCH_MAX_RECOMMENDATIONS",
                DEFAULT_MAX_RECOMMENDATIONS,
            )?,
            max_screened: parse_var("FIGHTMATCH_MAX_SCREENED", DEFAULT_MAX_SCREENED)?,
            screening_inactivity_days: parse_var(
                "FIGHTMATCH_SCREENING_INACTIVITY_DAYS",
                DEFAULT_SCREENING_INACTIVITY_DAYS,
            )?,
        };
        if limits.screening_inactivity_days < 0 {
            return Err(ConfigError::InvalidNumber {
                variable: "FIGHTMATCH_SCREENING_INACTIVITY_DAYS",
            });
        }

        let log_level = env::var("FIGHTMATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            engine: EngineConfig {
                default_policy,
                policy_file,
                limits,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling which policies are available and how long result lists get.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_policy: String,
    /// Optional JSON registry replacing the built-in presets.
    pub policy_file: Option<PathBuf>,
    pub limits: RecommendationLimits,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a non-negative whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
