use std::{env, path::Path, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{error::AppResult, store::timeout::StoreTimeouts};

/// Application configuration.
///
/// Contains the store connection and tracing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Document store configuration
    pub store: StoreConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Which store backs the catalog
    pub kind: StoreKind,
    /// Connection string, used by the `mongo` kind
    #[serde(default = "default_store_uri")]
    pub uri: String,
    /// Database holding the `authors` and `books` collections
    #[serde(default = "default_store_database")]
    pub database: String,
    /// Per-call deadlines
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// In-process storage that is lost on exit
    Memory,
    /// MongoDB document store
    Mongo,
}

/// Per-call deadlines in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment at startup
    pub connect_ms: u64,
    /// Point reads and writes
    pub short_ms: u64,
    /// Scans and batch lookups
    pub long_ms: u64,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TracingConfig {
    /// Formatted log output only
    Memory,
    /// Log output plus OpenTelemetry spans on standard output
    Stdout,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG_PATH";
const ENV_PREFIX: &str = "CATALOG";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

fn default_store_uri() -> String {
    "mongodb://localhost:27017".into()
}

fn default_store_database() -> String {
    "library".into()
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        let timeouts = StoreTimeouts::default();
        Self {
            connect_ms: timeouts.connect.as_millis() as u64,
            short_ms: timeouts.point.as_millis() as u64,
            long_ms: timeouts.scan.as_millis() as u64,
        }
    }
}

impl From<TimeoutConfig> for StoreTimeouts {
    fn from(config: TimeoutConfig) -> Self {
        Self {
            connect: Duration::from_millis(config.connect_ms),
            point: Duration::from_millis(config.short_ms),
            scan: Duration::from_millis(config.long_ms),
        }
    }
}

impl AppConfig {
    /// Loads configuration from files and environment variables.
    ///
    /// Sources, later ones overriding earlier ones:
    ///
    /// 1. `<dir>/default` where `<dir>` is `CATALOG_CONFIG_PATH` or `config`
    /// 2. `<dir>/local`, if present
    /// 3. `CATALOG_*` environment variables, with `__` separating nested keys,
    ///    e.g. `CATALOG_STORE__URI`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Loads configuration rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        Ok(Config::builder()
            .set_default(DISTRIBUTION_VERSION_KEY, VERSION)?
            // Initial "default" configuration file
            .add_source(File::from(config_path.join("default")))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(File::from(config_path.join("local")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?)
    }
}
