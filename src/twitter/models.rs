//! Wire models for X API v2 responses.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use crate::platform::{Post, ReferenceKind, ReferencedPost, User};

/// Envelope shared by every v2 endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub data: Option<T>,
    pub includes: Option<Includes>,
    pub errors: Option<Vec<ApiErrorDetail>>,
}

impl<T> ApiResponse<T> {
    /// Joined error titles/details, used when `data` is missing.
    pub fn error_summary(&self) -> String {
        self.errors
            .as_ref()
            .map(|errors| {
                errors
                    .iter()
                    .map(ApiErrorDetail::describe)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|summary| !summary.is_empty())
            .unwrap_or_else(|| "no data returned".to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Includes {
    #[serde(default)]
    pub users: Vec<UserData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorDetail {
    fn describe(&self) -> String {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserData {
    pub id: String,
    pub username: String,
}

impl From<UserData> for User {
    fn from(data: UserData) -> Self {
        User {
            id: data.id,
            username: data.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetData {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub referenced_tweets: Vec<ReferencedTweetData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferencedTweetData {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl From<ReferencedTweetData> for ReferencedPost {
    fn from(data: ReferencedTweetData) -> Self {
        ReferencedPost {
            kind: ReferenceKind::from_api(&data.kind),
            id: data.id,
        }
    }
}

impl TweetData {
    /// Converts to a [`Post`], dropping tweets without a creation time.
    pub fn into_post(self) -> Option<Post> {
        let created_at = match self.created_at {
            Some(created_at) => created_at,
            None => {
                warn!("Tweet {} missing created_at field", self.id);
                return None;
            }
        };
        Some(Post {
            id: self.id,
            author_id: self.author_id.unwrap_or_default(),
            text: self.text,
            created_at,
        })
    }
}

/// Body of `POST /2/tweets`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedTweet {
    pub id: String,
}
