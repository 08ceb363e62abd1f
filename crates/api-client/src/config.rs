//! Configuration for the Yotpo API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default Yotpo API host
pub const DEFAULT_BASE_URL: &str = "https://api.yotpo.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("yotpo-api-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `YOTPO_API_URL`: Base URL (defaults to `https://api.yotpo.com`)
    /// - `YOTPO_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let defaults = Self::default();

        let base_url = env::var("YOTPO_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = env::var("YOTPO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(defaults.timeout, Duration::from_secs);

        let config = Self {
            base_url,
            timeout,
            user_agent: defaults.user_agent,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }

    /// Resolve a request path against the base URL
    ///
    /// Leading slashes on `path` are ignored, so `/reviews/1` and `reviews/1`
    /// land on the same URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.yotpo.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("yotpo-api-client/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("reviews-sync/2.0");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "reviews-sync/2.0");
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());

        let empty = ClientConfig::default().with_base_url("");
        assert!(empty.validate().is_err());

        let no_scheme = ClientConfig::default().with_base_url("api.yotpo.com");
        assert!(no_scheme.validate().is_err());

        let zero_timeout = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_url_for_normalizes_slashes() {
        let config = ClientConfig::default().with_base_url("https://api.yotpo.com/");
        assert_eq!(
            config.url_for("/reviews/dynamic_create"),
            "https://api.yotpo.com/reviews/dynamic_create"
        );
        assert_eq!(
            config.url_for("reviews/async_update"),
            "https://api.yotpo.com/reviews/async_update"
        );
    }

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(12));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], 12);

        let back: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.timeout, Duration::from_secs(12));
    }
}
