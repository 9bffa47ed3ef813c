//! Tweet operations for Twitter API.
//!
//! This module contains functions for reading a user's timeline, fetching a
//! single tweet, and replying to tweets using the Twitter API v2.

use log::{debug, info};
use serde_json::json;

use crate::error::PlatformError;
use crate::platform::Post;

use super::api::{AuthMode, XApiClient};
use super::models::{ApiResponse, CreatedTweet, TweetData};

/// Bounds the timeline endpoint accepts for `max_results`.
const TIMELINE_MIN_RESULTS: u32 = 5;
const TIMELINE_MAX_RESULTS: u32 = 100;

impl XApiClient {
    /// Fetches the most recent tweets of a user, newest first.
    ///
    /// # Parameters
    ///
    /// - `user_id`: The numeric id of the user
    /// - `max_results`: How many tweets to request (clamped to 5..=100)
    pub(crate) async fn fetch_user_tweets(
        &self,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<Post>, PlatformError> {
        info!("Fetching up to {} tweets for user {}", max_results, user_id);

        let max_results = max_results
            .clamp(TIMELINE_MIN_RESULTS, TIMELINE_MAX_RESULTS)
            .to_string();
        let path = format!("/2/users/{}/tweets", user_id);
        let response: ApiResponse<Vec<TweetData>> = self
            .get_json(
                &path,
                &[
                    ("max_results", max_results.as_str()),
                    ("tweet.fields", "author_id,created_at"),
                ],
                AuthMode::App,
                "list_user_tweets",
            )
            .await?;

        let posts: Vec<Post> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(TweetData::into_post)
            .collect();
        info!("Found {} tweets for user {}", posts.len(), user_id);
        Ok(posts)
    }

    /// Fetches a single tweet by id.
    pub(crate) async fn fetch_tweet(&self, tweet_id: &str) -> Result<Post, PlatformError> {
        debug!("Fetching tweet {}", tweet_id);

        let path = format!("/2/tweets/{}", tweet_id);
        let response: ApiResponse<TweetData> = self
            .get_json(
                &path,
                &[("tweet.fields", "author_id,created_at")],
                AuthMode::App,
                "get_tweet",
            )
            .await?;

        let summary = response.error_summary();
        response
            .data
            .and_then(TweetData::into_post)
            .ok_or_else(|| PlatformError::NotFound(format!("tweet {}: {}", tweet_id, summary)))
    }

    /// Replies to a tweet using the Twitter/X API v2 endpoint.
    ///
    /// This function posts a reply to an existing tweet by including the `reply` parameter
    /// in the tweet payload. It signs the request as the bot account with OAuth 1.0a.
    ///
    /// # Parameters
    ///
    /// - `text`: The text content of the reply tweet
    /// - `reply_to_tweet_id`: The ID of the tweet to reply to
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The id of the posted reply
    /// - `Err(PlatformError)`: If authentication fails, network error, or API error
    pub(crate) async fn reply_to_tweet(
        &self,
        text: &str,
        reply_to_tweet_id: &str,
    ) -> Result<String, PlatformError> {
        info!("Starting reply operation to tweet {}", reply_to_tweet_id);

        let payload = json!({
            "text": text,
            "reply": {
                "in_reply_to_tweet_id": reply_to_tweet_id
            }
        });

        let response: ApiResponse<CreatedTweet> = self
            .post_json("/2/tweets", &payload, AuthMode::User, "reply_to_tweet")
            .await?;

        let summary = response.error_summary();
        match response.data {
            Some(created) => {
                info!("Posted reply {} to tweet {}", created.id, reply_to_tweet_id);
                Ok(created.id)
            }
            None => Err(PlatformError::NotFound(format!("created reply: {}", summary))),
        }
    }
}
