//! Error types for the statsbot service.
//!
//! Platform failures fall into two handling categories: rate limiting, which the
//! mention loop waits out until the declared reset time, and everything else,
//! which the loop logs before a fixed back-off.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by a [`PlatformClient`](crate::platform::PlatformClient).
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The request quota is exhausted. `reset_at` is the platform-declared
    /// reset time, when the response carried one.
    #[error("Rate limit exceeded (reset at {})", format_reset(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    #[error("Twitter API error for operation '{operation}' ({status})")]
    Api { operation: String, status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("OAuth signing error: {0}")]
    Signing(String),
}

impl PlatformError {
    /// Returns true when this error is the platform's rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, PlatformError::RateLimited { .. })
    }
}

fn format_reset(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(reset) => reset.to_rfc3339(),
        None => "unknown".to_string(),
    }
}

/// Errors raised while loading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),

    #[error("{0} environment variable cannot be empty")]
    EmptyVar(&'static str),
}
