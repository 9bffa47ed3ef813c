//! # Statsbot Library
//!
//! A Twitter/X mention bot. It polls the mentions of the bot account, reads
//! simple commands out of the mention text, and replies with emoji and hashtag
//! statistics computed over the target user's recent tweets.
//!
//! ## Commands
//!
//! - `@bot my stats`: stats for the author of the mention
//! - `@bot their stats` (as a reply): stats for the author of the tweet being replied to
//!
//! Adding `daily`, `weekly`, `monthly` or `yearly` limits the stats to tweets
//! from that window.
//!
//! ## Configuration
//!
//! The following environment variables are required:
//! - `API_KEY`, `API_SECRET`: Consumer key and secret
//! - `BEARER_TOKEN`: App-only bearer token
//! - `ACCESS_TOKEN`, `ACCESS_TOKEN_SECRET`: Credentials of the bot account
//!
//! `X_API_BASE_URL` optionally overrides the API host.

pub mod analyzer;
pub mod command;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod formatter;
pub mod mention_loop;
pub mod oauth;
pub mod platform;
pub mod timeframe;
pub mod twitter;

// Re-export commonly used types and functions
pub use analyzer::{analyze_tweets, FrequencyCount, TweetStats};
pub use command::{parse_command, StatsRequest};
pub use config::TwitterConfig;
pub use error::{ConfigError, PlatformError};
pub use fetcher::fetch_user_tweets;
pub use formatter::generate_stats;
pub use mention_loop::{MentionBot, MentionOutcome};
pub use oauth::build_bearer_auth_header;
pub use platform::{Mention, PlatformClient, Post, User, UserLookup};
pub use timeframe::Timeframe;
pub use twitter::XApiClient;
