//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::DEFAULT_BASE_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_token_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("notes-assistant").join("token").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.notes-token".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

impl SessionConfig {
    /// Token file path with a leading `~` expanded
    pub fn token_path(&self) -> PathBuf {
        match self.token_file.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.token_file)),
            None => PathBuf::from(&self.token_file),
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
    "warn".to_string()
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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

    /// Load from default locations or environment.
    ///
    /// Files that exist but cannot be used are skipped and listed in the
    /// report, which is meant to be logged once a subscriber is installed.
    pub fn load_default() -> (Self, LoadReport) {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("notes-assistant").join("config.toml")),
            Some(PathBuf::from("/etc/notes-assistant/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];
        let paths: Vec<PathBuf> = config_paths.into_iter().flatten().collect();
        Self::load_first(&paths)
    }

    /// First usable file among `paths`, else defaults with env overrides
    fn load_first(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    report.source = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.skipped.push(e),
            }
        }

        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NOTES_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(secs) = std::env::var("NOTES_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.api.request_timeout_secs = Some(secs);
            }
        }

        if let Ok(path) = std::env::var("NOTES_TOKEN_FILE") {
            self.session.token_file = path;
        }

        if let Ok(level) = std::env::var("NOTES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NOTES_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where [`Config::load_default`] found its settings
#[derive(Debug, Default)]
pub struct LoadReport {
    /// `None` when only defaults and environment overrides apply
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl LoadReport {
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Ignoring config file: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
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
    r#"# Notes Assistant Configuration
#
# Environment variables override these settings:
# - NOTES_API_URL
# - NOTES_REQUEST_TIMEOUT_SECS
# - NOTES_TOKEN_FILE
# - NOTES_LOG_LEVEL
# - NOTES_LOG_FORMAT

[api]
# Notes backend URL
base_url = "http://localhost:8080"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[session]
# File holding the bearer token between runs
token_file = "~/.local/share/notes-assistant/token"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.request_timeout(), None);
        assert_eq!(config.logging.level, "warn");
        assert!(config.session.token_file.ends_with("token"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.token_path().is_absolute() || dirs::home_dir().is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://notes.internal:9000\"\nrequest_timeout_secs = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://notes.internal:9000");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_broken_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        let missing = dir.path().join("missing.toml");
        std::fs::write(&broken, "[api\nbase_url = ").unwrap();
        std::fs::write(&good, "[logging]\nformat = \"json\"\n").unwrap();

        let (config, report) = Config::load_first(&[missing.clone(), broken.clone(), good.clone()]);
        assert_eq!(config.logging.format, "json");
        assert_eq!(report.source, Some(good));
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(&report.skipped[0], ConfigError::Parse { path, .. } if *path == broken));

        let (config, report) = Config::load_first(&[broken, missing]);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(report.source, None);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_token_path_expands_home() {
        let session = SessionConfig {
            token_file: "/tmp/notes/token".to_string(),
        };
        assert_eq!(session.token_path(), PathBuf::from("/tmp/notes/token"));

        if let Some(home) = dirs::home_dir() {
            let session = SessionConfig {
                token_file: "~/notes/token".to_string(),
            };
            assert_eq!(session.token_path(), home.join("notes/token"));
        }
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("NOTES_TOKEN_FILE", "/tmp/env-token");
        let config = Config::from_env();
        std::env::remove_var("NOTES_TOKEN_FILE");

        assert_eq!(config.session.token_file, "/tmp/env-token");
    }
}
