//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument or environment variable (clap merges the two)
//! 2. TOML config file
//! 3. OS-dependent compiled default
//!
//! A missing or unreadable config file is not fatal: a warning is logged and
//! resolution falls through to the compiled defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Bootstrap settings read from `config.toml`
///
/// Every field is optional; absent fields fall back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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

/// Values used when neither the command line nor the config file sets them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub const HOST: &'static str = "127.0.0.1";
    pub const PORT: u16 = 5000;

    pub fn for_current_platform() -> Self {
        Self {
            database_path: default_data_dir().join("booking.db"),
            host: Self::HOST.to_string(),
            port: Self::PORT,
            log_level: default_log_level(),
        }
    }
}

/// Explicit settings from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Config file to read instead of the platform default
    pub config_file: Option<PathBuf>,
}

/// Fully resolved bootstrap settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl BootstrapConfig {
    /// Merge overrides, the config file and compiled defaults
    pub fn resolve(overrides: &Overrides) -> Self {
        let toml = overrides
            .config_file
            .clone()
            .or_else(default_config_file)
            .map(|path| load_or_default(&path))
            .unwrap_or_default();

        Self::merge(overrides, toml, CompiledDefaults::for_current_platform())
    }

    fn merge(overrides: &Overrides, toml: TomlConfig, defaults: CompiledDefaults) -> Self {
        Self {
            database_path: overrides
                .database_path
                .clone()
                .or(toml.database_path)
                .unwrap_or(defaults.database_path),
            host: overrides
                .host
                .clone()
                .or(toml.host)
                .unwrap_or(defaults.host),
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            log_level: toml.logging.level,
        }
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

fn load_or_default(path: &Path) -> TomlConfig {
    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return TomlConfig::default();
    }

    match load_toml_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Platform config file location, e.g. `~/.config/booking/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("booking").join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/booking
        dirs::data_local_dir()
            .map(|d| d.join("booking"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/booking"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/booking
        dirs::data_dir()
            .map(|d| d.join("booking"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/booking"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\booking
        dirs::data_local_dir()
            .map(|d| d.join("booking"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\booking"))
    } else {
        PathBuf::from("./booking_data")
    }
}
