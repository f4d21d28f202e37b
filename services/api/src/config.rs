//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// When absent the service runs on the in-process memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub log_level: Level,
    pub auth_token_ttl_days: i64,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
    pub seed_gifts_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3060)),
            database_url: None,
            database_max_connections: 5,
            log_level: Level::INFO,
            auth_token_ttl_days: 30,
            cors_allowed_origin: None,
            seed_gifts_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Database Settings ---
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", &lookup, defaults.database_max_connections)?;
        if database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        // --- Auth Settings ---
        let auth_token_ttl_days =
            parse_or("AUTH_TOKEN_TTL_DAYS", &lookup, defaults.auth_token_ttl_days)?;
        if auth_token_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue(
                "AUTH_TOKEN_TTL_DAYS".to_string(),
                "must be a positive number of days".to_string(),
            ));
        }

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .filter(|origin| !origin.trim().is_empty() && origin.trim() != "*");

        let seed_gifts_path = lookup("SEED_GIFTS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_address,
            database_url,
            database_max_connections,
            log_level,
            auth_token_ttl_days,
            cors_allowed_origin,
            seed_gifts_path,
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
