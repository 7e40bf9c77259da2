//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Both binaries share this struct: the server
//! reads the bind and storage settings, the terminal client reads the API URL and
//! sync period.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
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
    pub database_url: String,
    pub log_level: Level,
    /// Directory served for any path outside `/api`.
    pub static_dir: PathBuf,
    pub seed_sample_data: bool,
    /// Base URL the terminal client talks to.
    pub api_base_url: String,
    pub sync_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // --- Server and Database Settings ---
        let bind_address_str = var("BIND_ADDRESS", "0.0.0.0:8195");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = var("DATABASE_URL", "sqlite://questions.db?mode=rwc");

        let log_level_str = var("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let static_dir = PathBuf::from(var("STATIC_DIR", "./public"));

        let seed_str = var("SEED_SAMPLE_DATA", "true");
        let seed_sample_data = seed_str.parse::<bool>().map_err(|_| {
            ConfigError::InvalidValue(
                "SEED_SAMPLE_DATA".to_string(),
                format!("'{}' is not true or false", seed_str),
            )
        })?;

        // --- Client Settings ---
        let api_base_url = var("TRACKER_API_URL", "http://127.0.0.1:8195")
            .trim_end_matches('/')
            .to_string();

        let interval_str = var("SYNC_INTERVAL_SECS", "30");
        let sync_interval = interval_str
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SYNC_INTERVAL_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", interval_str),
                )
            })?;

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            static_dir,
            seed_sample_data,
            api_base_url,
            sync_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 8195);
        assert_eq!(config.database_url, "sqlite://questions.db?mode=rwc");
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.seed_sample_data);
        assert_eq!(config.api_base_url, "http://127.0.0.1:8195");
        assert_eq!(config.sync_interval, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("RUST_LOG", "debug"),
            ("SEED_SAMPLE_DATA", "false"),
            ("TRACKER_API_URL", "http://tracker.local/"),
            ("SYNC_INTERVAL_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(!config.seed_sample_data);
        assert_eq!(config.api_base_url, "http://tracker.local");
        assert_eq!(config.sync_interval, Duration::from_secs(5));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = load(&[("SYNC_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("SYNC_INTERVAL_SECS"));

        let err = load(&[("BIND_ADDRESS", "nowhere")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));
    }
}
