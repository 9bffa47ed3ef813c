//! Twitter/X API integration module.
//!
//! This module contains the X API v2 client: user lookups, timelines,
//! mentions and replies, authenticated with an app bearer token for reads and
//! OAuth 1.0a for calls made as the bot account.

mod api;
mod mentions;
mod models;
mod tweets;
mod users;

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::platform::{Mention, PlatformClient, Post, User, UserLookup};

// Re-export public API
pub use api::XApiClient;
pub use users::is_valid_username;

// Crate-internal re-exports
pub(crate) use api::sanitize_for_logging;

#[async_trait]
impl PlatformClient for XApiClient {
    async fn authenticated_user(&self) -> Result<User, PlatformError> {
        self.fetch_authenticated_user().await
    }

    async fn lookup_user(&self, lookup: UserLookup<'_>) -> Result<User, PlatformError> {
        self.fetch_user(lookup).await
    }

    async fn list_user_posts(
        &self,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<Post>, PlatformError> {
        self.fetch_user_tweets(user_id, max_results).await
    }

    async fn list_mentions(
        &self,
        user_id: &str,
        since_id: Option<&str>,
    ) -> Result<Vec<Mention>, PlatformError> {
        self.fetch_mentions(user_id, since_id).await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, PlatformError> {
        self.fetch_tweet(post_id).await
    }

    async fn create_reply(&self, text: &str, in_reply_to: &str) -> Result<String, PlatformError> {
        self.reply_to_tweet(text, in_reply_to).await
    }
}
