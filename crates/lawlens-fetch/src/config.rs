//! Statute API client configuration.
//!
//! Defaults point at the production e-Gov endpoint. Override via environment
//! variables, a config file, or explicit construction for testing.

use serde::Deserialize;
use url::Url;

/// Production base URL of the e-Gov Law API v2.
pub const DEFAULT_BASE_URL: &str = "https://laws.e-gov.go.jp/api/2/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the statute API.
///
/// The base URL is kept as written and parsed by [`LawApiConfig::parsed_base_url`]
/// when a client is built, so a bad value in a config file surfaces as a
/// `ConfigError` rather than a deserialization failure deep in serde.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LawApiConfig {
    /// Base URL that `law_data/{id}` is appended to.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LawApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LAWLENS_API_BASE_URL` (default: `https://laws.e-gov.go.jp/api/2/`)
    /// - `LAWLENS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            base_url: env_url("LAWLENS_API_BASE_URL", DEFAULT_BASE_URL)?.to_string(),
            timeout_secs: std::env::var("LAWLENS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        config.parsed_base_url()?;
        Ok(config)
    }

    /// Create a configuration pointing at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` does not parse.
    pub fn local_mock(base: &str) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base.to_string(),
            timeout_secs: 5,
        };
        config.parsed_base_url()?;
        Ok(config)
    }

    /// Parse the base URL and check that it can carry path segments.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidUrl` if the value does not parse.
    /// - `ConfigError::NotABase` for opaque URLs such as `mailto:`.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl("base_url".to_string(), e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(self.base_url.clone()));
        }
        Ok(url)
    }
}

impl Default for LawApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured URL (named by its source) failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// The base URL parsed but cannot have path segments appended.
    #[error("base URL {0} cannot carry path segments")]
    NotABase(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let cfg = LawApiConfig::default();
        assert_eq!(cfg.parsed_base_url().unwrap().as_str(), DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = LawApiConfig::local_mock("http://127.0.0.1:9000").unwrap();
        assert_eq!(cfg.parsed_base_url().unwrap().as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(LawApiConfig::local_mock("not a url").is_err());
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("LAWLENS_NONEXISTENT_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("LAWLENS_TEST_BAD_URL", "not a url");
        let result = env_url("LAWLENS_TEST_BAD_URL", "https://example.com");
        std::env::remove_var("LAWLENS_TEST_BAD_URL");
        assert!(result.is_err());
    }

    #[test]
    fn opaque_urls_are_rejected() {
        let cfg = LawApiConfig {
            base_url: "mailto:someone@example.com".into(),
            timeout_secs: 1,
        };
        assert!(matches!(cfg.parsed_base_url(), Err(ConfigError::NotABase(_))));
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: LawApiConfig = serde_json::from_str(r#"{"timeout_secs": 7}"#).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, 7);
    }
}
