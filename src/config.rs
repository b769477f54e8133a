//! Configuration system
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub announcement: AnnouncementConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entry store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("codeboard")
                .join("board.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./codeboard_data/board.db".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Live view configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// How long an entry stays visible after creation (seconds)
    #[serde(default = "default_active_window")]
    pub active_window_secs: u64,

    /// How often the local expiry sweep runs (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_active_window() -> u64 {
    5 * 60
}

fn default_sweep_interval() -> u64 {
    10
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            active_window_secs: default_active_window(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Announcement banner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementConfig {
    #[serde(default = "default_announcement_text")]
    pub text: String,

    #[serde(default = "default_announcement_link")]
    pub link: String,
}

fn default_announcement_text() -> String {
    "Regístrate con un código y deja otro para que la cadena siga".to_string()
}

fn default_announcement_link() -> String {
    "https://www.chatcut.io/projects".to_string()
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            text: default_announcement_text(),
            link: default_announcement_link(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("codeboard").join("config.toml")),
            Some(PathBuf::from("/etc/codeboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var("CODEBOARD_DB_PATH") {
            self.store.db_path = db_path;
        }

        if let Ok(host) = std::env::var("CODEBOARD_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("CODEBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(link) = std::env::var("CODEBOARD_ANNOUNCEMENT_LINK") {
            self.announcement.link = link;
        }

        if let Ok(level) = std::env::var("CODEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CODEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Codeboard Configuration
#
# Environment variables override these settings:
# - CODEBOARD_DB_PATH
# - CODEBOARD_HOST
# - CODEBOARD_PORT
# - CODEBOARD_ANNOUNCEMENT_LINK
# - CODEBOARD_LOG_LEVEL
# - CODEBOARD_LOG_FORMAT

[store]
# SQLite database file for the entry collection
db_path = "~/.local/share/codeboard/board.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

[board]
# How long an entry stays visible after creation (seconds)
active_window_secs = 300

# How often the local expiry sweep runs (seconds)
sweep_interval_secs = 10

[announcement]
# Banner text shown above the board
text = "Regístrate con un código y deja otro para que la cadena siga"

# Fixed external link in the banner
link = "https://www.chatcut.io/projects"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
