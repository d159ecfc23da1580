//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NEUROLAB_API_URL` - Backend API base URL, including the `/api` prefix
//!   (default: the hosted Neurolab backend)
//! - `NEUROLAB_TOKEN_FILE` - Path of the bearer-token file
//!   (default: `$HOME/.neurolab/token`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend base URL (the hosted Neurolab API).
const DEFAULT_API_URL: &str = "https://web-backend-ivhv.onrender.com/api";

/// Token file location relative to the home directory.
const DEFAULT_TOKEN_FILE: &str = ".neurolab/token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that failed validation.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL, including the `/api` prefix.
    pub api_url: Url,
    /// Path of the file the bearer token is persisted in.
    pub token_file: PathBuf,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production").
    pub sentry_environment: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional; defaults target the hosted backend and a
    /// token file under the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `NEUROLAB_API_URL` is set
    /// but not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            env::var("NEUROLAB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let api_url = Url::parse(raw_url.trim_end_matches('/'))
            .map_err(|e| ConfigError::InvalidEnvVar("NEUROLAB_API_URL", e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "NEUROLAB_API_URL",
                format!("unsupported scheme: {}", api_url.scheme()),
            ));
        }

        let token_file = env::var("NEUROLAB_TOKEN_FILE").map_or_else(
            |_| default_token_file(),
            PathBuf::from,
        );

        Ok(Self {
            api_url,
            token_file,
            sentry_dsn: env::var("SENTRY_DSN").ok(),
            sentry_environment: env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }
}

/// Resolve the default token file path.
///
/// Falls back to the current directory when `HOME` is unset (containers).
fn default_token_file() -> PathBuf {
    env::var("HOME").map_or_else(
        |_| PathBuf::from(DEFAULT_TOKEN_FILE),
        |home| PathBuf::from(home).join(DEFAULT_TOKEN_FILE),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_parses() {
        let url = Url::parse(DEFAULT_API_URL).unwrap();
        assert_eq!(url.scheme(), "https");
        assert!(url.path().ends_with("/api"));
    }

    #[test]
    fn test_default_token_file_is_under_home_when_set() {
        let path = default_token_file();
        assert!(path.ends_with(".neurolab/token"));
    }
}
