//! Platform abstraction for the social-media API.
//!
//! The mention loop and the tweet fetcher only talk to the platform through the
//! [`PlatformClient`] trait, so they can run against an in-memory fake in tests.
//! The production implementation is [`XApiClient`](crate::twitter::XApiClient).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PlatformError;

/// A single post (tweet) as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// How a mention relates to another post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    RepliedTo,
    Quoted,
    Retweeted,
    Other(String),
}

impl ReferenceKind {
    /// Maps the platform's `referenced_tweets[].type` string.
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "replied_to" => ReferenceKind::RepliedTo,
            "quoted" => ReferenceKind::Quoted,
            "retweeted" => ReferenceKind::Retweeted,
            other => ReferenceKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedPost {
    pub kind: ReferenceKind,
    pub id: String,
}

/// A post that mentions the bot account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub post: Post,
    /// Author username, when the platform expanded it alongside the mention.
    pub author_username: Option<String>,
    pub referenced_posts: Vec<ReferencedPost>,
}

impl Mention {
    /// Returns the id of the post this mention replies to, if its first
    /// reference is a `replied_to` relation.
    pub fn replied_to_id(&self) -> Option<&str> {
        self.referenced_posts
            .first()
            .filter(|reference| reference.kind == ReferenceKind::RepliedTo)
            .map(|reference| reference.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Selects a user either by handle or by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup<'a> {
    Username(&'a str),
    Id(&'a str),
}

/// The operations the bot needs from the social-media platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// The account the client is authenticated as (the bot itself).
    async fn authenticated_user(&self) -> Result<User, PlatformError>;

    async fn lookup_user(&self, lookup: UserLookup<'_>) -> Result<User, PlatformError>;

    /// Up to `max_results` most recent posts of a user, newest first.
    async fn list_user_posts(
        &self,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<Post>, PlatformError>;

    /// Mentions of `user_id` newer than `since_id`, newest first.
    async fn list_mentions(
        &self,
        user_id: &str,
        since_id: Option<&str>,
    ) -> Result<Vec<Mention>, PlatformError>;

    async fn get_post(&self, post_id: &str) -> Result<Post, PlatformError>;

    /// Posts `text` as a reply to `in_reply_to`, returning the new post id.
    async fn create_reply(&self, text: &str, in_reply_to: &str) -> Result<String, PlatformError>;
}
