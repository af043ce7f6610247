//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use community_core::StreakPolicy;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub streak: StreakConfig,
    pub batch: BatchConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory of SQL migrations to apply on startup, if any
    #[serde(default)]
    pub migrations_dir: Option<String>,
}

/// Streak calculation settings
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StreakConfig {
    #[serde(default)]
    pub skip_canceled_events: bool,
}

impl StreakConfig {
    /// Policy handed to the streak calculator
    #[must_use]
    pub fn policy(&self) -> StreakPolicy {
        StreakPolicy {
            skip_canceled_events: self.skip_canceled_events,
        }
    }
}

/// Batch maintenance settings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BatchConfig {
    /// Members processed at once; 1 means strictly sequential
    #[serde(default = "default_batch_concurrency")]
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_batch_concurrency(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "community-portal".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_batch_concurrency() -> usize {
    4
}

fn parse_var<T: FromStr>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, value)),
    }
}

fn parse_flag(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    match raw.as_deref().map(|s| s.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name, v)),
        },
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV").map(|s| s.to_lowercase()) {
            None => Environment::default(),
            Some(s) => match s.as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let concurrency = parse_var::<usize>("BATCH_CONCURRENCY", lookup("BATCH_CONCURRENCY"))?
            .unwrap_or_else(default_batch_concurrency);
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "BATCH_CONCURRENCY",
                "0".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", lookup("DATABASE_MAX_CONNECTIONS"))?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", lookup("DATABASE_MIN_CONNECTIONS"))?
                    .unwrap_or_else(default_min_connections),
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR").filter(|s| !s.trim().is_empty()),
            },
            streak: StreakConfig {
                skip_canceled_events: parse_flag(
                    "STREAK_SKIP_CANCELED_EVENTS",
                    lookup("STREAK_SKIP_CANCELED_EVENTS"),
                )?,
            },
            batch: BatchConfig { concurrency },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
