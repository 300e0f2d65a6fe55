//! Configuration loading.
//!
//! Loads console configuration from `./config.toml` (or `$VIZIER_CONFIG_PATH`).
//! Environment variables override file values; file values override defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Top-level console configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Status query settings (`[query]`).
    pub query: QueryConfig,
    /// Refresh loop settings (`[watch]`).
    pub watch: WatchConfig,
    /// Console process settings (`[console]`).
    pub console: ProcessConfig,
}

/// Status query settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// GraphQL endpoint serving the cluster status query.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/graphql".to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Refresh loop settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between status fetches.
    pub interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Console process settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for rotated log files in production mode.
    pub logs_dir: PathBuf,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$VIZIER_CONFIG_PATH` or `./config.toml`. A missing
    /// file falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from the TOML file only, no env overrides.
    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        Self::read_file(&path)
    }

    /// Read and parse one config file; a missing file yields defaults.
    fn read_file(path: &std::path::Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: ConsoleConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(ConsoleConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve the config file path using a custom env resolver.
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("VIZIER_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("config.toml")
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("VIZIER_ENDPOINT") {
            self.query.endpoint = v;
        }
        if let Some(v) = env("VIZIER_POLL_INTERVAL_SECS") {
            match v.parse() {
                Ok(n) => self.watch.interval_secs = n,
                Err(_) => tracing::warn!(
                    var = "VIZIER_POLL_INTERVAL_SECS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("VIZIER_LOG_LEVEL") {
            self.console.log_level = v;
        }
    }

    /// The query endpoint as a validated URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is not a valid URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.query.endpoint)
            .with_context(|| format!("invalid query endpoint {:?}", self.query.endpoint))
    }

    /// The per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.query.timeout_secs)
    }
}
