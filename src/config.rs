//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the session token is written into the `authorization` header.
///
/// Every authenticated request uses the same scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// The bare token
    #[default]
    Raw,
    /// `Bearer <token>`
    Bearer,
}

impl AuthScheme {
    pub fn header_value(&self, token: &str) -> String {
        match self {
            AuthScheme::Raw => token.to_string(),
            AuthScheme::Bearer => format!("Bearer {}", token),
        }
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(AuthScheme::Raw),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(ConfigError::Invalid(format!("unknown auth scheme {:?}", other))),
        }
    }
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static service key sent as `x-apikeeda-key`
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub auth_scheme: AuthScheme,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Default apikeeda endpoint
pub const DEFAULT_BASE_URL: &str = "https://service.apikeeda.com/api/v1";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            auth_scheme: AuthScheme::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServiceConfig {
    /// Config pointing at an arbitrary base URL
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("blogdesk").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./blogdesk_session.json"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// What an authenticated view does when no token is stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTokenPolicy {
    /// Navigate to the login screen
    #[default]
    Redirect,
    /// Stay put and render an empty list
    Empty,
}

impl std::str::FromStr for MissingTokenPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redirect" => Ok(MissingTokenPolicy::Redirect),
            "empty" => Ok(MissingTokenPolicy::Empty),
            other => Err(ConfigError::Invalid(format!(
                "unknown missing-token policy {:?}",
                other
            ))),
        }
    }
}

/// View behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,

    #[serde(default)]
    pub on_missing_token: MissingTokenPolicy,
}

fn default_debounce() -> u64 {
    300
}

fn default_min_search_len() -> usize {
    2
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_debounce(),
            min_search_len: default_min_search_len(),
            on_missing_token: MissingTokenPolicy::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn search_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from an explicit path, the default locations, or environment only.
    ///
    /// An explicit path that fails to load is an error; default locations
    /// that fail are skipped with a warning.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_with_env(path);
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("blogdesk").join("config.toml")),
            Some(PathBuf::from("./blogdesk.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("BLOGDESK_API_URL") {
            self.service.base_url = url;
        }
        if let Some(key) = lookup("BLOGDESK_API_KEY") {
            self.service.api_key = key;
        }
        if let Some(scheme) = lookup("BLOGDESK_AUTH_SCHEME") {
            self.service.auth_scheme = scheme.parse()?;
        }
        if let Some(path) = lookup("BLOGDESK_SESSION_PATH") {
            self.session.path = PathBuf::from(path);
        }
        if let Some(level) = lookup("BLOGDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BLOGDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
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
    r#"# Blogdesk Configuration
#
# Environment variables override these settings:
# - BLOGDESK_API_URL
# - BLOGDESK_API_KEY
# - BLOGDESK_AUTH_SCHEME
# - BLOGDESK_SESSION_PATH
# - BLOGDESK_LOG_LEVEL
# - BLOGDESK_LOG_FORMAT

[service]
# apikeeda REST endpoint
base_url = "https://service.apikeeda.com/api/v1"

# Service key sent as the x-apikeeda-key header
api_key = ""

# How the session token is sent: "raw" or "bearer"
auth_scheme = "raw"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the login session is persisted
# path = "~/.local/share/blogdesk/session.json"

[console]
# Quiet period before a search is sent (ms)
search_debounce_ms = 300

# Shortest search term that triggers a filtered fetch
min_search_len = 2

# Without a stored token: "redirect" to login or show an "empty" list
on_missing_token = "redirect"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.auth_scheme, AuthScheme::Raw);
        assert_eq!(config.console.search_debounce_ms, 300);
        assert_eq!(config.console.min_search_len, 2);
        assert_eq!(config.console.on_missing_token, MissingTokenPolicy::Redirect);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [service]
            auth_scheme = "bearer"

            [console]
            on_missing_token = "empty"
            "#,
        )
        .unwrap();
        assert_eq!(config.service.auth_scheme, AuthScheme::Bearer);
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.console.on_missing_token, MissingTokenPolicy::Empty);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BLOGDESK_API_URL", "http://127.0.0.1:9000/api/v1"),
            ("BLOGDESK_API_KEY", "k-123"),
            ("BLOGDESK_AUTH_SCHEME", "Bearer"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.service.base_url, "http://127.0.0.1:9000/api/v1");
        assert_eq!(config.service.api_key, "k-123");
        assert_eq!(config.service.auth_scheme, AuthScheme::Bearer);
    }

    #[test]
    fn test_bad_scheme_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|k| {
            (k == "BLOGDESK_AUTH_SCHEME").then(|| "basic".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_auth_header_value() {
        assert_eq!(AuthScheme::Raw.header_value("tok"), "tok");
        assert_eq!(AuthScheme::Bearer.header_value("tok"), "Bearer tok");
    }

    #[test]
    fn test_base_trims_trailing_slash() {
        let service = ServiceConfig::new("http://localhost:1/api/v1/", "");
        assert_eq!(service.base(), "http://localhost:1/api/v1");
    }
}
