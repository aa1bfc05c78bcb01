//! Configuration loading and resolution
//!
//! Bootstrap settings come from four places, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Dashboard HTTP port (matches the original web front end)
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// AI Engine analyze endpoint
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:8000/analyze";
/// 10 MiB, the limit advertised by the upload panel
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ENV_CONFIG_PATH: &str = "FELIX_CONFIG";
pub const ENV_PORT: &str = "FELIX_PORT";
pub const ENV_BIND_ADDRESS: &str = "FELIX_BIND_ADDRESS";
pub const ENV_ENGINE_URL: &str = "FELIX_ENGINE_URL";

/// Bootstrap configuration as written in `felix-ui.toml`
///
/// Every key is optional; absent keys fall through to environment or defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub bind_address: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub max_upload_bytes: Option<usize>,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[engine]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub url: Option<String>,

    /// Upstream request timeout; no timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location: `<config dir>/felix/felix-ui.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("felix").join("felix-ui.toml"))
}

/// Pick the config file path: explicit argument, then `FELIX_CONFIG`, then platform default
pub fn config_file_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }
    default_config_path()
}

/// Load the TOML bootstrap file
///
/// A missing file is not an error: defaults are used. A file that exists but
/// does not parse is a configuration error. Runs before logging is set up, so
/// the caller reports which file was used.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(config)
}

/// Command-line overrides (highest priority)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub engine_url: Option<String>,
}

/// Fully resolved dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub engine_url: String,
    pub engine_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            engine_timeout: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: default_log_level(),
        }
    }
}

impl ServiceConfig {
    /// Merge overrides, environment, TOML and defaults
    pub fn resolve(overrides: &ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let bind_address = overrides
            .bind_address
            .clone()
            .or_else(|| std::env::var(ENV_BIND_ADDRESS).ok())
            .or_else(|| toml_config.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let port = match overrides.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw.trim().parse::<u16>().map_err(|e| {
                    Error::Config(format!("{}='{}' is not a valid port: {}", ENV_PORT, raw, e))
                })?,
                Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let engine_url = overrides
            .engine_url
            .clone()
            .or_else(|| std::env::var(ENV_ENGINE_URL).ok())
            .or_else(|| toml_config.engine.url.clone())
            .unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string());
        validate_engine_url(&engine_url)?;

        let config = Self {
            bind_address,
            port,
            engine_url,
            engine_timeout: toml_config.engine.timeout_secs.map(Duration::from_secs),
            max_upload_bytes: toml_config
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            log_level: toml_config.logging.level.clone(),
        };

        info!(
            bind = %config.bind_address,
            port = config.port,
            engine = %config.engine_url,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                Error::Config(format!(
                    "Invalid bind address {}:{}: {}",
                    self.bind_address, self.port, e
                ))
            })
    }
}

fn validate_engine_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid engine URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Engine URL must use http or https, got '{}'",
            other
        ))),
    }
}
