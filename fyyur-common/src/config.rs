//! Configuration loading and resolution
//!
//! Bootstrap settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Built-in default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const ENV_CONFIG: &str = "FYYUR_CONFIG";
pub const ENV_DATABASE: &str = "FYYUR_DATABASE";
pub const ENV_HOST: &str = "FYYUR_HOST";
pub const ENV_PORT: &str = "FYYUR_PORT";

/// Bootstrap configuration as written in the TOML file
///
/// Every key is optional; missing keys fall back to built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite busy timeout applied to every connection
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Upper bound for handling a single request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            host: default_host(),
            port: default_port(),
            busy_timeout_ms: default_busy_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub busy_timeout: Duration,
    pub request_timeout: Duration,
    pub logging: LoggingConfig,
}

impl Config {
    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolve the bootstrap configuration from CLI, environment, TOML and defaults
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<Config> {
    let toml_config = match locate_config_file(overrides.config_file.as_deref())? {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            load_toml_config(&path)?
        }
        None => {
            debug!("No configuration file found, using built-in defaults");
            TomlConfig::default()
        }
    };

    let database_path = overrides
        .database_path
        .clone()
        .or_else(|| std::env::var(ENV_DATABASE).ok().map(PathBuf::from))
        .or_else(|| toml_config.database_path.clone())
        .unwrap_or_else(default_database_path);

    let host = overrides
        .host
        .clone()
        .or_else(|| std::env::var(ENV_HOST).ok())
        .unwrap_or(toml_config.host);

    let port = match overrides.port {
        Some(port) => port,
        None => match std::env::var(ENV_PORT) {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("Invalid {}: {}", ENV_PORT, e)))?,
            Err(_) => toml_config.port,
        },
    };

    Ok(Config {
        database_path,
        host,
        port,
        busy_timeout: Duration::from_millis(toml_config.busy_timeout_ms),
        request_timeout: Duration::from_millis(toml_config.request_timeout_ms),
        logging: toml_config.logging,
    })
}

/// Parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Find the configuration file to load
///
/// An explicitly named file (CLI or environment) must exist; the
/// per-user default is only used when present.
fn locate_config_file(cli_arg: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    Ok(default_config_file().filter(|path| path.exists()))
}

/// `<config_dir>/fyyur/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// `<data_local_dir>/fyyur/fyyur.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join("fyyur.db")
}
