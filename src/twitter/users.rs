//! User lookups for Twitter API.

use log::{info, warn};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::PlatformError;
use crate::platform::{User, UserLookup};

use super::api::{AuthMode, XApiClient};
use super::models::{ApiResponse, UserData};

/// Returns true if `username` is a syntactically valid X handle
/// (1-15 letters, digits or underscores, optional leading `@`).
pub fn is_valid_username(username: &str) -> bool {
    static USERNAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let username = username.strip_prefix('@').unwrap_or(username);
    USERNAME_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").ok())
        .as_ref()
        .map(|re| re.is_match(username))
        .unwrap_or(false)
}

impl XApiClient {
    /// Looks up the account the OAuth 1.0a access token belongs to.
    pub(crate) async fn fetch_authenticated_user(&self) -> Result<User, PlatformError> {
        info!("Looking up authenticated user");
        let response: ApiResponse<UserData> = self
            .get_json(
                "/2/users/me",
                &[("user.fields", "username")],
                AuthMode::User,
                "get_me",
            )
            .await?;

        let summary = response.error_summary();
        response
            .data
            .map(User::from)
            .ok_or_else(|| PlatformError::NotFound(format!("authenticated user: {}", summary)))
    }

    /// Looks up a user by username or id using the Twitter API v2.
    ///
    /// # Returns
    ///
    /// - `Ok(User)`: User information if found
    /// - `Err(PlatformError::NotFound)`: If the handle is malformed or the user does not exist
    /// - `Err(PlatformError)`: If the API request fails
    pub(crate) async fn fetch_user(&self, lookup: UserLookup<'_>) -> Result<User, PlatformError> {
        let path = match lookup {
            UserLookup::Username(username) => {
                info!("Looking up user by username: {}", username);
                if !is_valid_username(username) {
                    warn!("Rejecting malformed username: {}", username);
                    return Err(PlatformError::NotFound(format!("user @{}", username)));
                }
                let username = username.strip_prefix('@').unwrap_or(username);
                format!("/2/users/by/username/{}", username)
            }
            UserLookup::Id(id) => {
                info!("Looking up user by id: {}", id);
                if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                    return Err(PlatformError::NotFound(format!("user id {}", id)));
                }
                format!("/2/users/{}", id)
            }
        };

        let response: ApiResponse<UserData> = self
            .get_json(&path, &[("user.fields", "username")], AuthMode::App, "lookup_user")
            .await?;

        let summary = response.error_summary();
        match response.data {
            Some(user) => {
                info!("Found user {} (@{})", user.id, user.username);
                Ok(user.into())
            }
            None => {
                warn!("User lookup returned no data: {}", summary);
                Err(PlatformError::NotFound(summary))
            }
        }
    }
}
