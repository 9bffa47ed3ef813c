//! Retrieval of a user's recent tweets.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::error::PlatformError;
use crate::platform::{PlatformClient, Post, UserLookup};
use crate::timeframe::Timeframe;

/// How many recent tweets are pulled per user.
pub const MAX_RECENT_TWEETS: u32 = 50;

/// Fetches up to [`MAX_RECENT_TWEETS`] recent tweets of `username`, keeping
/// only those inside `timeframe` when one is given.
///
/// Never fails: any platform error (unknown user, network, rate limit) is
/// logged and yields an empty list, which callers treat the same as a user
/// without tweets.
pub async fn fetch_user_tweets<C>(
    client: &C,
    username: &str,
    timeframe: Option<Timeframe>,
) -> Vec<Post>
where
    C: PlatformClient + ?Sized,
{
    info!(
        "Fetching tweets for @{} (timeframe: {})",
        username,
        timeframe.map(|t| t.keyword()).unwrap_or("all")
    );

    let user = match client.lookup_user(UserLookup::Username(username)).await {
        Ok(user) => user,
        Err(e) => {
            log_fetch_error(username, &e);
            return Vec::new();
        }
    };

    let posts = match client.list_user_posts(&user.id, MAX_RECENT_TWEETS).await {
        Ok(posts) => posts,
        Err(e) => {
            log_fetch_error(username, &e);
            return Vec::new();
        }
    };
    debug!("Retrieved {} tweets for @{}", posts.len(), username);

    match timeframe {
        Some(timeframe) => filter_by_timeframe(posts, timeframe, Utc::now()),
        None => posts,
    }
}

fn log_fetch_error(username: &str, e: &PlatformError) {
    if e.is_rate_limited() {
        warn!("Rate limited while fetching tweets for @{}: {}", username, e);
    } else {
        error!("Error fetching tweets for @{}: {}", username, e);
    }
}

/// Keeps the posts created at or after `now - timeframe`.
pub fn filter_by_timeframe(posts: Vec<Post>, timeframe: Timeframe, now: DateTime<Utc>) -> Vec<Post> {
    let cutoff = now - timeframe.duration();
    posts
        .into_iter()
        .filter(|post| post.created_at >= cutoff)
        .collect()
}
