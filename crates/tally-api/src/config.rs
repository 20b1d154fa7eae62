//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! ## Environment Variables
//! - `TALLY_DB_PATH`: SQLite database file (default: `./data/tally.db`)
//! - `TALLY_DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `TALLY_CURRENCY_SYMBOL`: prefix for formatted amounts (default: `$`)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use tally_db::DbConfig;

const DEFAULT_DB_PATH: &str = "./data/tally.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,

    /// Maximum pooled connections
    pub db_max_connections: u32,

    /// Currency symbol used by `format_currency`
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let db_path = match lookup("TALLY_DB_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("TALLY_DB_PATH".to_string()))
            }
            Some(path) => PathBuf::from(path),
            None => defaults.db_path,
        };

        let db_max_connections = match lookup("TALLY_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or_else(|| ConfigError::InvalidValue("TALLY_DB_MAX_CONNECTIONS".to_string()))?,
            None => defaults.db_max_connections,
        };

        let currency_symbol = lookup("TALLY_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol);

        Ok(AppConfig {
            db_path,
            db_max_connections,
            currency_symbol,
        })
    }

    /// Database pool configuration derived from this config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use tally_api::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(1430), "$14.30");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let whole = (cents / 100).abs();
        let frac = (cents % 100).abs();

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            whole,
            frac
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
