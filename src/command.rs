//! Command parsing for mention text.
//!
//! Recognised commands (case-insensitive substring match, first match wins):
//!
//! - `my stats`: stats for the mention's author
//! - `their stats`: stats for the author of the tweet being replied to
//!
//! Either may carry a timeframe keyword (`daily`, `weekly`, `monthly`, `yearly`).

use crate::timeframe::Timeframe;

const MY_STATS: &str = "my stats";
const THEIR_STATS: &str = "their stats";

/// A parsed stats request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    /// Whose tweets to analyze.
    pub username: String,
    pub timeframe: Option<Timeframe>,
}

/// Parses a mention into a stats request.
///
/// # Parameters
///
/// - `text`: The mention text
/// - `author_username`: Username of the mention's author
/// - `original_username`: Author of the tweet the mention replies to, if resolved
///
/// # Returns
///
/// - `Some(StatsRequest)`: If the text carries a usable command
/// - `None`: If the mention should be skipped
pub fn parse_command(
    text: &str,
    author_username: &str,
    original_username: Option<&str>,
) -> Option<StatsRequest> {
    let lowered = text.to_lowercase();

    let username = if lowered.contains(MY_STATS) {
        author_username
    } else if lowered.contains(THEIR_STATS) {
        original_username?
    } else {
        return None;
    };

    Some(StatsRequest {
        username: username.to_string(),
        timeframe: Timeframe::find_in(&lowered),
    })
}
