//! Runtime configuration: the NewsAPI credential plus the fixed request settings.
//!
//! The credential comes from `NEWS_API_KEY` (or `--api-key`). A local `.env`
//! file is read into the process environment first so that clap's `env`
//! fallback can see it.

use crate::error::{AppError, ConfigError};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Environment variable holding the NewsAPI key.
pub const API_KEY_VAR: &str = "NEWS_API_KEY";

/// NewsAPI "everything" search endpoint.
pub const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Upper bound on the whole request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Populate the process environment from `./.env` (or the nearest parent).
///
/// Variables already set in the environment win. A missing file is normal and
/// not reported; a file that exists but cannot be parsed is logged and skipped.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "Ignoring unreadable .env file"),
    }
}

/// Settings passed explicitly through the pipeline.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    endpoint: Url,
    timeout: Duration,
}

impl Config {
    /// Build a configuration from an optional credential.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKey`] when the key is absent or only whitespace.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self, AppError> {
        Self::build(api_key, NEWS_API_URL)
    }

    fn build(api_key: Option<String>, endpoint: &str) -> Result<Self, AppError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingKey { var: API_KEY_VAR })?;

        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::Endpoint {
            url: endpoint.to_string(),
            source,
        })?;

        Ok(Self {
            api_key,
            endpoint,
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Loopback servers in tests stand in for NewsAPI.
#[cfg(test)]
impl Config {
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the key out of logs and panics.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err = Config::from_api_key(None).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::MissingKey { var: API_KEY_VAR })
        ));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_blank_key_is_config_error() {
        let err = Config::from_api_key(Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn test_key_is_trimmed() {
        let config = Config::from_api_key(Some(" abc123 \n".to_string())).unwrap();
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.endpoint().as_str(), NEWS_API_URL);
        assert_eq!(config.timeout(), REQUEST_TIMEOUT);
    }

    #[test]
    fn test_bad_endpoint_is_config_error() {
        let err = Config::build(Some("k".to_string()), "not a url").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Endpoint { .. })));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_missing_key_checked_before_endpoint() {
        let err = Config::build(None, "not a url").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::from_api_key(Some("super-secret".to_string())).unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_with_endpoint_overrides_default() {
        let url = Url::parse("http://127.0.0.1:9/v2/everything").unwrap();
        let config = Config::from_api_key(Some("k".to_string()))
            .unwrap()
            .with_endpoint(url.clone());
        assert_eq!(config.endpoint(), &url);
    }
}
