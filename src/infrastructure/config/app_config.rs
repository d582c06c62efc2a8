//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "thumbgate";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "thumbgate";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Serve lookups from the thumbnail store instead of the history service.
    #[serde(default = "default_true")]
    pub use_thumbnail_store: bool,

    /// Optional file overriding the built-in default thumbnail.
    #[serde(default)]
    pub default_thumbnail: Option<PathBuf>,

    /// Thumbnail store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// History service configuration.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Thumbnail store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of thumbnails kept in the hot map.
    #[serde(default = "default_store_capacity")]
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_store_capacity(),
        }
    }
}

/// History service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Whether a history service instance exists in this deployment.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_store_capacity() -> usize {
    256
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(thumbnail_store) = args.thumbnail_store {
            self.use_thumbnail_store = thumbnail_store;
        }
        if let Some(default_thumbnail) = args.default_thumbnail {
            self.default_thumbnail = Some(default_thumbnail);
        }
        if let Some(capacity) = args.store_capacity {
            self.store.capacity = capacity;
        }
        if let Some(history) = args.history {
            self.history.enabled = history;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("thumbgate.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            use_thumbnail_store: true,
            default_thumbnail: None,
            store: StoreConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"
            use_thumbnail_store = false
            default_thumbnail = "/srv/thumbs/placeholder.png"

            [store]
            capacity = 64

            [history]
            enabled = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.use_thumbnail_store);
        assert_eq!(
            config.default_thumbnail,
            Some(PathBuf::from("/srv/thumbs/placeholder.png"))
        );
        assert_eq!(config.store.capacity, 64);
        assert!(!config.history.enabled);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.use_thumbnail_store);
        assert_eq!(config.default_thumbnail, None);
        assert_eq!(config.store.capacity, 256);
        assert!(config.history.enabled); // default_true
    }

    #[test]
    fn test_merge_with_args_overrides_flags() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Trace),
            thumbnail_store: Some(false),
            default_thumbnail: None,
            store_capacity: Some(8),
            history: Some(false),
            urls: Vec::new(),
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert!(!config.use_thumbnail_store);
        assert_eq!(config.store.capacity, 8);
        assert!(!config.history.enabled);
    }
}
