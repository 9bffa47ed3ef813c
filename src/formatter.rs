//! Rendering of tweet statistics into the reply text.

use crate::analyzer::{FrequencyCount, TweetStats};
use crate::timeframe::Timeframe;

/// Placeholder shown when a count map has no entries.
pub const NO_TOP_TOKEN: &str = "None";

/// Builds the stats reply for `username`.
///
/// ```rust
/// use statsbot::{analyze_tweets, generate_stats, Timeframe};
///
/// let stats = analyze_tweets(&[]);
/// let text = generate_stats("alice", &stats, Some(Timeframe::Daily));
/// assert!(text.starts_with("📊 @alice's Twitter Stats (Daily):"));
/// assert!(text.contains("Top Emoji: None"));
/// ```
pub fn generate_stats(username: &str, stats: &TweetStats, timeframe: Option<Timeframe>) -> String {
    let timeframe_text = timeframe
        .map(|timeframe| format!(" ({})", timeframe.label()))
        .unwrap_or_default();

    format!(
        "📊 @{}'s Twitter Stats{}:\n\
         🔝 Top Emoji: {}\n\
         🔝 Top Hashtag: {}\n\
         🎉 Total Emojis: {}\n\
         🏷️ Total Hashtags: {}",
        username,
        timeframe_text,
        top_or_none(&stats.emojis),
        top_or_none(&stats.hashtags),
        stats.emojis.total(),
        stats.hashtags.total()
    )
}

fn top_or_none(counts: &FrequencyCount) -> &str {
    counts.top().unwrap_or(NO_TOP_TOKEN)
}
