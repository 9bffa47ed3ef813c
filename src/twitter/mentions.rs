//! Mention timeline polling for Twitter API.

use log::{debug, info};
use std::collections::HashMap;

use crate::error::PlatformError;
use crate::platform::{Mention, ReferencedPost};

use super::api::{AuthMode, XApiClient};
use super::models::{ApiResponse, TweetData};

/// Largest page the mentions endpoint serves.
const MENTIONS_PAGE_SIZE: &str = "100";

impl XApiClient {
    /// Fetches mentions of `user_id` newer than `since_id`, newest first.
    ///
    /// Each mention carries its referenced tweets and, via the `author_id`
    /// expansion, the author's username.
    pub(crate) async fn fetch_mentions(
        &self,
        user_id: &str,
        since_id: Option<&str>,
    ) -> Result<Vec<Mention>, PlatformError> {
        info!(
            "Fetching mentions for user {} since {}",
            user_id,
            since_id.unwrap_or("the beginning")
        );

        let path = format!("/2/users/{}/mentions", user_id);
        let mut params = vec![
            ("tweet.fields", "author_id,created_at,referenced_tweets"),
            ("expansions", "author_id"),
            ("user.fields", "username"),
            ("max_results", MENTIONS_PAGE_SIZE),
        ];
        if let Some(since_id) = since_id {
            params.push(("since_id", since_id));
        }

        let response: ApiResponse<Vec<TweetData>> = self
            .get_json(&path, &params, AuthMode::App, "list_mentions")
            .await?;

        let usernames: HashMap<String, String> = response
            .includes
            .map(|includes| {
                includes
                    .users
                    .into_iter()
                    .map(|user| (user.id, user.username))
                    .collect()
            })
            .unwrap_or_default();

        let mentions: Vec<Mention> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|mut tweet| {
                let referenced_posts: Vec<ReferencedPost> = tweet
                    .referenced_tweets
                    .drain(..)
                    .map(ReferencedPost::from)
                    .collect();
                tweet.into_post().map(|post| Mention {
                    author_username: usernames.get(&post.author_id).cloned(),
                    post,
                    referenced_posts,
                })
            })
            .collect();

        debug!("Decoded {} mentions", mentions.len());
        Ok(mentions)
    }
}
