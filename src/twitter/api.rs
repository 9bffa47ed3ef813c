//! Core Twitter API utilities.
//!
//! This module contains the HTTP client for the X API v2 and the low-level
//! helpers every endpoint goes through: URL building, request signing, status
//! handling and rate-limit detection.

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, error, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::TwitterConfig;
use crate::error::PlatformError;
use crate::oauth::{build_bearer_auth_header, build_oauth1_header, percent_encode, OAuthNonce};

/// Per-request timeout for X API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which credentials authorize a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthMode {
    /// App-only bearer token
    App,
    /// OAuth 1.0a as the bot account
    User,
}

/// X API v2 client implementing [`PlatformClient`](crate::platform::PlatformClient).
#[derive(Debug, Clone)]
pub struct XApiClient {
    http: Client,
    config: TwitterConfig,
}

impl XApiClient {
    /// Builds a client with the default request timeout.
    pub fn new(config: TwitterConfig) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("statsbot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn authorize(
        &self,
        builder: RequestBuilder,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        auth: AuthMode,
    ) -> Result<RequestBuilder, PlatformError> {
        let header = match auth {
            AuthMode::App => build_bearer_auth_header(&self.config.bearer_token),
            AuthMode::User => {
                build_oauth1_header(method, url, params, &self.config, &OAuthNonce::generate())?
            }
        };
        Ok(builder.header("Authorization", header))
    }

    /// Sends a signed GET and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        auth: AuthMode,
        operation_name: &str,
    ) -> Result<T, PlatformError> {
        let url = self.endpoint(path);
        let full_url = if params.is_empty() {
            url.clone()
        } else {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", url, query)
        };
        debug!("Request URL for '{}': {}", operation_name, full_url);

        let request_builder =
            self.authorize(self.http.get(&full_url), "GET", &url, params, auth)?;
        let response_text = self.execute(request_builder, operation_name).await?;
        Ok(serde_json::from_str(&response_text)?)
    }

    /// Sends a signed JSON POST and decodes the JSON body.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
        auth: AuthMode,
        operation_name: &str,
    ) -> Result<T, PlatformError> {
        let url = self.endpoint(path);
        debug!("Request URL for '{}': {}", operation_name, url);
        debug!("Request payload: {}", payload);

        let request_builder = self.authorize(
            self.http
                .post(&url)
                .header("Content-Type", "application/json")
                .json(payload),
            "POST",
            &url,
            &[],
            auth,
        )?;
        let response_text = self.execute(request_builder, operation_name).await?;
        Ok(serde_json::from_str(&response_text)?)
    }

    /// Sends a request and maps the response status.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The response body on 2xx
    /// - `Err(PlatformError::RateLimited)`: On 429, with the `x-rate-limit-reset` time if present
    /// - `Err(PlatformError::Api)`: On any other non-success status
    /// - `Err(PlatformError::Http)`: On transport failures
    async fn execute(
        &self,
        request_builder: RequestBuilder,
        operation_name: &str,
    ) -> Result<String, PlatformError> {
        debug!("Making request for operation: {}", operation_name);

        let response = request_builder.send().await?;
        let status = response.status();
        let reset_at = parse_rate_limit_reset(response.headers());
        debug!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        if status.is_success() {
            let response_text = response.text().await?;
            debug!(
                "Response summary for '{}': {} bytes received",
                operation_name,
                response_text.len()
            );
            return Ok(response_text);
        }

        let error_text = response.text().await.unwrap_or_default();
        debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&error_text, 200)
        );

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                "Rate limited on operation '{}' (reset at {:?})",
                operation_name, reset_at
            );
            return Err(PlatformError::RateLimited { reset_at });
        }

        if status == StatusCode::UNAUTHORIZED {
            error!(
                "Received 401 Unauthorized for operation '{}' - check the configured credentials",
                operation_name
            );
        } else {
            error!("Operation '{}' failed - Status: {}", operation_name, status);
        }
        Err(PlatformError::Api {
            operation: operation_name.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Reads the `x-rate-limit-reset` header (unix seconds).
pub(crate) fn parse_rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_chars`: Maximum length in characters before truncation
pub(crate) fn sanitize_for_logging(text: &str, max_chars: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_chars {
        let truncated: String = sanitized.chars().take(max_chars).collect();
        format!("{}... [truncated, {} total bytes]", truncated, text.len())
    } else {
        sanitized
    }
}
