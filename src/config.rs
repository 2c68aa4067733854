//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::ClientConfig;
use crate::models::{DEFAULT_TOP_K, MAX_TOP_K};
use crate::theme::FileThemeStore;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: SearchConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search service configuration
#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static access key. Never logged.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            top_k: default_top_k(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl SearchConfig {
    /// Settings for [`crate::client::LegalSearchClient`]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone().filter(|key| !key.is_empty()),
        }
    }
}

/// Theme persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_path")]
    pub path: PathBuf,
}

fn default_theme_path() -> PathBuf {
    FileThemeStore::default_path()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            path: default_theme_path(),
        }
    }
}

impl ThemeConfig {
    pub fn store(&self) -> FileThemeStore {
        FileThemeStore::new(&self.path)
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
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Values are validated after the overrides are applied.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// First existing file of `~/.config/legal-assistant/config.toml` and
    /// `./legal-assistant.toml`
    pub fn default_path() -> Option<PathBuf> {
        first_existing(&[
            dirs::config_dir().map(|p| p.join("legal-assistant").join("config.toml")),
            Some(PathBuf::from("./legal-assistant.toml")),
        ])
    }

    /// Check values the search service would reject
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOP_K).contains(&self.client.top_k) {
            return Err(ConfigError::Invalid(format!(
                "client.top_k must be between 1 and {}, got {}",
                MAX_TOP_K, self.client.top_k
            )));
        }
        if !self.client.base_url.starts_with("http://")
            && !self.client.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "client.base_url must be an http(s) URL, got {:?}",
                self.client.base_url
            )));
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = var("LEGAL_ASSISTANT_API_URL") {
            self.client.base_url = url;
        }
        if let Some(key) = var("LEGAL_ASSISTANT_API_KEY") {
            self.client.api_key = Some(key);
        }
        if let Some(top_k) = var("LEGAL_ASSISTANT_TOP_K") {
            self.client.top_k = top_k.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "LEGAL_ASSISTANT_TOP_K must be a number, got {:?}",
                    top_k
                ))
            })?;
        }

        if let Some(level) = var("LEGAL_ASSISTANT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LEGAL_ASSISTANT_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
}

fn first_existing(candidates: &[Option<PathBuf>]) -> Option<PathBuf> {
    candidates.iter().flatten().find(|path| path.exists()).cloned()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Legal Assistant Configuration
#
# Environment variables override these settings:
# - LEGAL_ASSISTANT_API_URL
# - LEGAL_ASSISTANT_API_KEY
# - LEGAL_ASSISTANT_TOP_K
# - LEGAL_ASSISTANT_LOG_LEVEL
# - LEGAL_ASSISTANT_LOG_FORMAT

[client]
# Search service base URL
base_url = "http://127.0.0.1:8000"

# Access key issued by the service administrator.
# Prefer LEGAL_ASSISTANT_API_KEY over storing the key here.
# api_key = ""

# Results per question (1-3)
top_k = 3

[theme]
# File holding the saved theme ("light" or "dark")
# path = "~/.config/legal-assistant/theme"

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
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.client.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.client.top_k, 3);
        assert!(config.client.api_key.is_none());
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.client.top_k, 3);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[client]
base_url = "https://search.example.org"
api_key = "abc"
top_k = 2

[theme]
path = "/tmp/theme"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.client.base_url, "https://search.example.org");
        assert_eq!(config.client.top_k, 2);
        assert_eq!(config.theme.path, PathBuf::from("/tmp/theme"));
        assert_eq!(config.client.client_config().api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_top_k_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ntop_k = 5\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/legal-assistant.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_file_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[client]\ntop_k = 9\napi_key = \"x\"\n").unwrap();
        let fallback = dir.path().join("legal-assistant.toml");

        let path = first_existing(&[Some(broken.clone()), Some(fallback)]).unwrap();
        assert_eq!(path, broken);
        assert!(matches!(
            Config::load_with_env(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_first_existing_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("legal-assistant.toml");
        std::fs::write(&present, "").unwrap();

        let found = first_existing(&[None, Some(dir.path().join("absent.toml")), Some(present.clone())]);
        assert_eq!(found, Some(present));
        assert_eq!(first_existing(&[None]), None);
    }

    #[test]
    fn test_overrides_apply_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ntop_k = 5\n").unwrap();

        let mut config = Config::read(&path).unwrap();
        config
            .apply_overrides(|name| (name == "LEGAL_ASSISTANT_TOP_K").then(|| "2".to_string()))
            .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.client.top_k, 2);
    }

    #[test]
    fn test_bad_top_k_override_is_an_error() {
        let mut config = Config::default();
        let result =
            config.apply_overrides(|name| (name == "LEGAL_ASSISTANT_TOP_K").then(|| "abc".to_string()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = Config::default();
        config.client.base_url = "127.0.0.1:8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_key_is_dropped() {
        let search = SearchConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(search.client_config().api_key.is_none());
        assert!(format!("{:?}", search).contains("<redacted>"));
    }
}
