use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when `auth.api_key` is not configured.
pub const API_KEY_ENV: &str = "API_KEY";

/// Main configuration structure for the industry index service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Upstream index endpoint and cache settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Bearer token authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// URL of the index endpoint (fetched with an empty POST)
    #[serde(default = "default_upstream_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a fetched document is served before refetching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_upstream_url() -> String {
    "https://index-webapp-app-l4agj.ondigitalocean.app/api/v1/index/industries".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_cache_ttl_secs() -> u64 {
    600
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable a permissive CORS layer
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthConfig {
    /// Static bearer token (can also be set via API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl AuthConfig {
    /// Configured key, falling back to `API_KEY`. Empty values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        let non_empty = |key: &String| !key.is_empty();
        self.api_key
            .clone()
            .filter(non_empty)
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(non_empty))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let auth = AuthConfig {
            api_key: Some("configured".to_string()),
        };
        temp_env::with_var(API_KEY_ENV, Some("from-env"), || {
            assert_eq!(auth.resolve_api_key().as_deref(), Some("configured"));
        });
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_env() {
        temp_env::with_var(API_KEY_ENV, Some("from-env"), || {
            assert_eq!(
                AuthConfig::default().resolve_api_key().as_deref(),
                Some("from-env")
            );
        });
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        temp_env::with_var(API_KEY_ENV, Some(""), || {
            assert!(AuthConfig::default().resolve_api_key().is_none());
        });
        let auth = AuthConfig {
            api_key: Some(String::new()),
        };
        temp_env::with_var_unset(API_KEY_ENV, || {
            assert!(auth.resolve_api_key().is_none());
        });
    }

    #[test]
    fn test_empty_configured_key_falls_back_to_env() {
        let auth = AuthConfig {
            api_key: Some(String::new()),
        };
        temp_env::with_var(API_KEY_ENV, Some("env-key"), || {
            assert_eq!(auth.resolve_api_key().as_deref(), Some("env-key"));
        });
    }

    #[test]
    fn test_logging_enums_parse_lowercase() {
        let config: LoggingConfig =
            serde_yaml::from_str("format: pretty\nrotation: never\n").unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.rotation, RotationPolicy::Never);
        assert_eq!(config.level, "info");
    }
}
