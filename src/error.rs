//! Error taxonomy for the search pipeline.
//!
//! Every stage returns [`AppError`]; the entry point is the only place that
//! renders it. Each top-level variant maps to its own process exit code so
//! scripts can tell a bad key from a bad date from an upstream outage without
//! scraping the message text.

use std::process::ExitCode;
use thiserror::Error;

/// Boxed transport-level cause carried by [`AppError::Network`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level failure of a single run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A user-supplied filter was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request did not complete within the configured bound.
    #[error("Request timed out. Please try again later.")]
    Timeout,

    /// DNS, connect, TLS, or any other transport failure that is not a timeout.
    #[error("Network error: {0}")]
    Network(#[source] BoxError),

    /// The server answered, but not with a usable result.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Problems found while building the runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API credential is missing or blank.
    #[error(
        "{var} not found. Set it in your environment, in a local .env file, or pass --api-key"
    )]
    MissingKey { var: &'static str },

    #[error("Invalid API endpoint {url}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Rejected command-line filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format: {input}. Use YYYY-MM-DD")]
    DateFormat { input: String },

    #[error("Invalid date range: from-date {from} is after to-date {to}")]
    DateRange { from: String, to: String },
}

/// Failures reported by the upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API Error: {payload}")]
    Payload { payload: String },

    #[error("API returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap any transport error as [`AppError::Network`].
    pub fn network<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        AppError::Network(err.into())
    }

    /// Short machine-friendly name of the failure kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "configuration",
            AppError::Validation(_) => "validation",
            AppError::Timeout => "timeout",
            AppError::Network(_) => "network",
            AppError::Api(_) => "api",
        }
    }

    /// Process exit status for this failure kind.
    ///
    /// `2` is left to clap for usage errors.
    pub fn exit_code(&self) -> ExitCode {
        let code: u8 = match self {
            AppError::Config(_) => 3,
            AppError::Validation(_) => 4,
            AppError::Timeout => 5,
            AppError::Network(_) => 6,
            AppError::Api(_) => 7,
        };
        ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message_names_variable() {
        let err: AppError = ConfigError::MissingKey { var: "NEWS_API_KEY" }.into();
        let msg = err.to_string();
        assert!(msg.contains("NEWS_API_KEY"));
        assert!(msg.contains(".env"));
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: AppError = ValidationError::DateFormat {
            input: "2024-13-01".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid date format: 2024-13-01. Use YYYY-MM-DD"
        );
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_timeout_distinct_from_network() {
        let timeout = AppError::Timeout;
        let network = AppError::network(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ));

        assert!(timeout.to_string().contains("timed out"));
        assert!(network.to_string().starts_with("Network error:"));
        assert!(network.to_string().contains("connection reset by peer"));
        assert_ne!(timeout.kind(), network.kind());
    }

    #[test]
    fn test_status_error_includes_code_and_body() {
        let err: AppError = ApiError::Status {
            status: 404,
            body: "not here".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not here"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            AppError::Config(ConfigError::MissingKey { var: "NEWS_API_KEY" }),
            AppError::Validation(ValidationError::DateFormat { input: "x".into() }),
            AppError::Timeout,
            AppError::network(std::io::Error::other("boom")),
            AppError::Api(ApiError::Payload { payload: "{}".into() }),
        ];
        let codes: Vec<String> = errors
            .iter()
            .map(|e| format!("{:?}", e.exit_code()))
            .collect();
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
