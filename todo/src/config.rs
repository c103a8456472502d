//! Configuration management for the task list.
//!
//! Loads configuration from environment variables. The project URL and API
//! key are required; everything else has a default.

use std::env;
use std::time::Duration;
use supatodo_supabase::SupabaseConfig;
use thiserror::Error;

/// Table used when `SUPABASE_TABLE` is unset
pub const DEFAULT_TABLE: &str = "tasks";

/// Seconds to wait for in-flight calls on exit when `SHUTDOWN_TIMEOUT` is unset
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "REACT_APP_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "REACT_APP_SUPABASE_ANON_KEY"];

/// A required setting is missing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No project URL
    #[error("SUPABASE_URL is not set")]
    MissingUrl,

    /// No API key
    #[error("SUPABASE_ANON_KEY is not set")]
    MissingAnonKey,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Project URL and public key
    pub supabase: SupabaseConfig,
    /// Table holding the tasks
    pub table: String,
    /// How long to wait for in-flight calls on exit
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Creates a configuration with default table and timeout
    #[must_use]
    pub fn new(supabase: SupabaseConfig) -> Self {
        Self {
            supabase,
            table: DEFAULT_TABLE.to_string(),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    /// Sets the table name
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// - `SUPABASE_URL` (or `REACT_APP_SUPABASE_URL`): required
    /// - `SUPABASE_ANON_KEY` (or `REACT_APP_SUPABASE_ANON_KEY`): required
    /// - `SUPABASE_TABLE`: default `tasks`
    /// - `SHUTDOWN_TIMEOUT`: seconds, default 5
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL or key is missing or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL or key is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&name| lookup(name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let url = first(&URL_VARS).ok_or(ConfigError::MissingUrl)?;
        let anon_key = first(&KEY_VARS).ok_or(ConfigError::MissingAnonKey)?;

        let mut config = Self::new(SupabaseConfig::new(url, anon_key));

        if let Some(table) = first(&["SUPABASE_TABLE"]) {
            config = config.with_table(table);
        }

        if let Some(secs) = lookup("SHUTDOWN_TIMEOUT").and_then(|s| s.trim().parse().ok()) {
            config = config.with_shutdown_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
