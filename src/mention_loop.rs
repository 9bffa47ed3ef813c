//! The mention polling loop.
//!
//! [`MentionBot`] owns the mention cursor and drives one poll per iteration:
//! fetch new mentions, answer each stats command oldest first, then wait.
//! Waits are 30 seconds after a successful poll, until the declared reset
//! time after a rate limit, and 60 seconds after any other platform error.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::time::Duration;

use crate::analyzer::analyze_tweets;
use crate::command::parse_command;
use crate::error::PlatformError;
use crate::fetcher::fetch_user_tweets;
use crate::formatter::generate_stats;
use crate::platform::{Mention, PlatformClient, UserLookup};
use crate::twitter::sanitize_for_logging;

/// Pause between successful polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Pause after a platform error other than rate limiting.
pub const ERROR_BACKOFF: Duration = Duration::from_secs(60);
/// Pause after a rate limit that carried no reset time.
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// What happened to a single mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionOutcome {
    /// Stats were posted as a reply.
    Replied { username: String, reply_id: String },
    /// The command was valid but the target had no tweets in range.
    NoTweets { username: String },
    /// The mention carried no usable command.
    Skipped,
}

/// Long-running controller for the mention loop.
pub struct MentionBot<C> {
    client: C,
    bot_user_id: Option<String>,
    last_mention_id: Option<String>,
}

impl<C: PlatformClient> MentionBot<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            bot_user_id: None,
            last_mention_id: None,
        }
    }

    /// Starts from a known cursor instead of processing every visible mention.
    pub fn with_cursor(mut self, last_mention_id: impl Into<String>) -> Self {
        self.last_mention_id = Some(last_mention_id.into());
        self
    }

    /// Id of the most recently processed mention.
    pub fn last_mention_id(&self) -> Option<&str> {
        self.last_mention_id.as_deref()
    }

    /// Runs forever. Each iteration polls once and sleeps for the delay the
    /// poll outcome calls for.
    pub async fn run(&mut self) {
        info!("Starting mention loop");
        loop {
            let delay = self.run_iteration().await;
            debug!("Sleeping for {} seconds", delay.as_secs());
            tokio::time::sleep(delay).await;
        }
    }

    /// Polls once and returns how long to wait before the next poll.
    pub async fn run_iteration(&mut self) -> Duration {
        match self.poll_mentions().await {
            Ok(_) => POLL_INTERVAL,
            Err(PlatformError::RateLimited { reset_at }) => {
                let wait = rate_limit_wait(reset_at, Utc::now());
                warn!("Rate limit reached. Sleeping for {} seconds.", wait.as_secs());
                wait
            }
            Err(e) => {
                error!("Error: {}", e);
                ERROR_BACKOFF
            }
        }
    }

    /// Fetches mentions newer than the cursor and processes them oldest first.
    ///
    /// The cursor advances past every mention that was processed, replied to
    /// or not. A missing replied-to tweet does not count as a failure. Any
    /// other error stops the batch with the cursor left on the last mention
    /// that completed, so the failing one is retried on the next poll.
    ///
    /// # Returns
    ///
    /// - `Ok(usize)`: Number of mentions processed
    /// - `Err(PlatformError)`: If listing or processing a mention failed
    pub async fn poll_mentions(&mut self) -> Result<usize, PlatformError> {
        let bot_user_id = self.bot_user_id().await?;
        let mentions = self
            .client
            .list_mentions(&bot_user_id, self.last_mention_id.as_deref())
            .await?;

        if mentions.is_empty() {
            debug!("No new mentions");
            return Ok(0);
        }
        info!("Found {} new mention(s)", mentions.len());

        let mut processed = 0;
        for mention in mentions.iter().rev() {
            let outcome = self.process_mention(mention).await?;
            debug!("Mention {} outcome: {:?}", mention.post.id, outcome);
            self.last_mention_id = Some(mention.post.id.clone());
            processed += 1;
        }

        Ok(processed)
    }

    /// Handles one mention: parses the command, computes the stats and replies.
    pub async fn process_mention(&self, mention: &Mention) -> Result<MentionOutcome, PlatformError> {
        debug!(
            "Processing mention {}: {}",
            mention.post.id,
            sanitize_for_logging(&mention.post.text, 200)
        );

        let original_username = match mention.replied_to_id() {
            Some(original_id) => self.resolve_original_author(original_id).await?,
            None => None,
        };

        let author_username = match &mention.author_username {
            Some(username) => username.clone(),
            None => {
                self.client
                    .lookup_user(UserLookup::Id(&mention.post.author_id))
                    .await?
                    .username
            }
        };

        let request = match parse_command(
            &mention.post.text,
            &author_username,
            original_username.as_deref(),
        ) {
            Some(request) => request,
            None => {
                debug!(
                    "Skipping mention {} from @{} - no stats command",
                    mention.post.id, author_username
                );
                return Ok(MentionOutcome::Skipped);
            }
        };

        let tweets = fetch_user_tweets(&self.client, &request.username, request.timeframe).await;
        if tweets.is_empty() {
            info!("No tweets found for @{}", request.username);
            return Ok(MentionOutcome::NoTweets {
                username: request.username,
            });
        }

        let stats = analyze_tweets(&tweets);
        let text = generate_stats(&request.username, &stats, request.timeframe);
        let reply_id = self.client.create_reply(&text, &mention.post.id).await?;

        info!(
            "Replied to @{} with {} stats",
            request.username,
            request
                .timeframe
                .map(|t| t.keyword())
                .unwrap_or("all-time")
        );

        Ok(MentionOutcome::Replied {
            username: request.username,
            reply_id,
        })
    }

    /// Username of the author of the replied-to tweet.
    ///
    /// A deleted or hidden tweet (or author) yields `Ok(None)`, so the mention
    /// is handled as if it replied to nothing. Other errors propagate.
    async fn resolve_original_author(
        &self,
        original_id: &str,
    ) -> Result<Option<String>, PlatformError> {
        let lookup = async {
            let original = self.client.get_post(original_id).await?;
            self.client
                .lookup_user(UserLookup::Id(&original.author_id))
                .await
        };

        match lookup.await {
            Ok(author) => {
                debug!(
                    "Mention replies to tweet {} by @{}",
                    original_id, author.username
                );
                Ok(Some(author.username))
            }
            Err(PlatformError::NotFound(reason)) => {
                warn!(
                    "Replied-to tweet {} could not be resolved ({}), ignoring it",
                    original_id, reason
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn bot_user_id(&mut self) -> Result<String, PlatformError> {
        if let Some(id) = &self.bot_user_id {
            return Ok(id.clone());
        }
        let me = self.client.authenticated_user().await?;
        info!("Authenticated as @{} ({})", me.username, me.id);
        self.bot_user_id = Some(me.id.clone());
        Ok(me.id)
    }
}

/// Time left until `reset_at`, or [`DEFAULT_RATE_LIMIT_WAIT`] when the
/// platform gave no reset time. A reset time in the past waits zero.
pub fn rate_limit_wait(reset_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
    match reset_at {
        Some(reset) => (reset - now).to_std().unwrap_or(Duration::ZERO),
        None => DEFAULT_RATE_LIMIT_WAIT,
    }
}
