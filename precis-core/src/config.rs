//! Configuration management for Precis.
//!
//! Configuration is loaded in order of precedence:
//! 1. Defaults
//! 2. Config file (~/.precis/config.toml)
//! 3. Environment variables
//! 4. CLI flags (handled at CLI layer)

use crate::model::{Algorithm, SentenceCount};
use crate::summarizers::SummarizerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Summarization defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Default algorithm
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Default number of sentences
    #[serde(default)]
    pub sentence_count: SentenceCount,

    /// Drop English stop words before ranking
    #[serde(default)]
    pub stop_words: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_mb() -> usize {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns the default Precis configuration directory (~/.precis)
    pub fn precis_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".precis"))
    }

    /// Returns the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        Self::precis_dir().map(|d| d.join("config.toml"))
    }

    /// Load configuration from the default path with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("PRECIS_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("PRECIS_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PRECIS_PORT '{}'", port),
            }
        }

        if let Some(level) = var("PRECIS_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(algorithm) = var("PRECIS_ALGORITHM") {
            match algorithm.parse() {
                Ok(algorithm) => self.summarizer.algorithm = algorithm,
                Err(e) => warn!("Ignoring PRECIS_ALGORITHM: {}", e),
            }
        }

        if let Some(count) = var("PRECIS_SENTENCES") {
            match count.parse() {
                Ok(count) => self.summarizer.sentence_count = count,
                Err(e) => warn!("Ignoring PRECIS_SENTENCES: {}", e),
            }
        }

        if let Some(enabled) = var("PRECIS_STOP_WORDS") {
            self.summarizer.stop_words = enabled.to_lowercase() == "true" || enabled == "1";
        }

        if let Some(size) = var("PRECIS_MAX_UPLOAD_MB") {
            match size.parse() {
                Ok(size) => self.server.max_upload_mb = size,
                Err(_) => warn!("Ignoring invalid PRECIS_MAX_UPLOAD_MB '{}'", size),
            }
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_upload_mb == 0 {
            return Err(ConfigError::ValidationError(
                "server.max_upload_mb must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Get the server URL
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Summarizer tuning derived from this configuration
    pub fn summarizer_options(&self) -> SummarizerOptions {
        SummarizerOptions::new().with_stop_words(self.summarizer.stop_words)
    }

    /// Ensure the Precis directory exists
    pub fn ensure_dirs() -> std::io::Result<()> {
        if let Some(dir) = Self::precis_dir() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.summarizer.algorithm, Algorithm::Lsa);
        assert_eq!(config.summarizer.sentence_count.get(), 5);
        assert!(!config.summarizer.stop_words);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.max_upload_mb, 20);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.max_upload_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[summarizer]
algorithm = "TextRank"
sentence_count = 10

[server]
port = 9999
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.summarizer.algorithm, Algorithm::TextRank);
        assert_eq!(config.summarizer.sentence_count.get(), 10);
        assert_eq!(config.server.port, 9999);
        // Defaults still applied
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_sentence_count_is_rejected() {
        let toml_str = "[summarizer]\nsentence_count = 0\n";
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.summarizer.algorithm = Algorithm::LexRank;
        config.summarizer.stop_words = true;
        config.server.max_upload_mb = 5;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.summarizer.algorithm, Algorithm::LexRank);
        assert!(loaded.summarizer.stop_words);
        assert_eq!(loaded.server.max_upload_mb, 5);
        assert!(loaded.summarizer_options().stop_words);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PRECIS_HOST", "0.0.0.0"),
            ("PRECIS_PORT", "9000"),
            ("PRECIS_ALGORITHM", "luhn"),
            ("PRECIS_SENTENCES", "20"),
            ("PRECIS_STOP_WORDS", "1"),
            ("PRECIS_MAX_UPLOAD_MB", "2"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server_addr(), "0.0.0.0:9000");
        assert_eq!(config.server_url(), "http://0.0.0.0:9000");
        assert_eq!(config.summarizer.algorithm, Algorithm::Luhn);
        assert_eq!(config.summarizer.sentence_count.get(), 20);
        assert!(config.summarizer.stop_words);
        assert_eq!(config.server.max_upload_mb, 2);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "PRECIS_PORT" => Some("not-a-port".to_string()),
            "PRECIS_ALGORITHM" => Some("bart".to_string()),
            "PRECIS_SENTENCES" => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.summarizer.algorithm, Algorithm::Lsa);
        assert_eq!(config.summarizer.sentence_count.get(), 5);
    }

    #[test]
    fn test_zero_upload_limit_is_invalid() {
        let mut config = Config::default();
        config.server.max_upload_mb = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
