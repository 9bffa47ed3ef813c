//! Configuration module for the statsbot service.
//!
//! This module contains configuration structures and environment variable handling
//! for the Twitter/X API integration.

use log::{debug, error, info, warn};
use std::env;

use crate::error::ConfigError;

/// Default X API host. Overridable with `X_API_BASE_URL`.
pub const DEFAULT_API_BASE_URL: &str = "https://api.x.com";

/// Configuration struct for Twitter/X API credentials.
///
/// The bearer token authenticates app-context reads (user lookups, timelines,
/// mentions). The consumer key/secret and access token/secret sign OAuth 1.0a
/// user-context calls made as the bot account.
#[derive(Clone)]
pub struct TwitterConfig {
    /// Consumer (API) key
    pub api_key: String,
    /// Consumer (API) secret
    pub api_secret: String,
    /// App-only Bearer Token
    pub bearer_token: String,
    /// Access token of the bot account
    pub access_token: String,
    /// Access token secret of the bot account
    pub access_token_secret: String,
    /// Base URL of the X API, without trailing slash
    pub api_base_url: String,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("api_key", &mask_token(&self.api_key))
            .field("api_secret", &"[REDACTED]")
            .field("bearer_token", &mask_token(&self.bearer_token))
            .field("access_token", &mask_token(&self.access_token))
            .field("access_token_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl TwitterConfig {
    /// Creates a new `TwitterConfig` instance by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `API_KEY`: Consumer key
    /// - `API_SECRET`: Consumer secret
    /// - `BEARER_TOKEN`: App-only bearer token
    /// - `ACCESS_TOKEN`: Access token of the bot account
    /// - `ACCESS_TOKEN_SECRET`: Access token secret of the bot account
    ///
    /// # Optional Environment Variables
    ///
    /// - `X_API_BASE_URL`: API host, defaults to `https://api.x.com`
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If every required variable is present and non-empty
    /// - `Err(ConfigError)`: Naming the first missing or empty variable
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use statsbot::TwitterConfig;
    ///
    /// let config = TwitterConfig::from_env().unwrap();
    /// println!("{:?}", config);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Twitter configuration from environment variables");

        let config = TwitterConfig {
            api_key: load_credential("API_KEY")?,
            api_secret: load_credential("API_SECRET")?,
            bearer_token: load_credential("BEARER_TOKEN")?,
            access_token: load_credential("ACCESS_TOKEN")?,
            access_token_secret: load_credential("ACCESS_TOKEN_SECRET")?,
            api_base_url: get_api_base_url(),
        };

        info!("Twitter configuration loaded successfully");
        debug!("Using X API at {}", config.api_base_url);
        Ok(config)
    }
}

/// Reads one required credential, logging its length and a masked prefix.
fn load_credential(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(token) => {
            let token = token.trim().to_string();
            if token.is_empty() {
                error!("{} is empty", name);
                return Err(ConfigError::EmptyVar(name));
            }

            info!(
                "Found {} environment variable with length: {}",
                name,
                token.len()
            );
            debug!("{} (masked): {}", name, mask_token(&token));

            if token.len() < 10 {
                warn!(
                    "{} seems unusually short ({} characters)",
                    name,
                    token.len()
                );
            }
            Ok(token)
        }
        Err(e) => {
            error!("Failed to load {} from environment: {}", name, e);
            error!("Make sure {} environment variable is set", name);
            Err(ConfigError::MissingVar(name))
        }
    }
}

/// Masks a secret for logging: the first and last 8 characters of long
/// tokens, only the first 8 of shorter ones.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    let prefix: String = chars.iter().take(8).collect();

    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

/// Gets the X API base URL from the environment or returns the default.
pub fn get_api_base_url() -> String {
    env::var("X_API_BASE_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijklmnopqrstuvwxyz"), "abcdefgh...stuvwxyz");
        assert_eq!(mask_token("abcdefghij"), "abcdefgh...");
        assert_eq!(mask_token("abc"), "abc...");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = TwitterConfig {
            api_key: "key-0123456789".to_string(),
            api_secret: "very-secret-consumer".to_string(),
            bearer_token: "bearer-0123456789abcdef".to_string(),
            access_token: "access-0123456789".to_string(),
            access_token_secret: "very-secret-access".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
