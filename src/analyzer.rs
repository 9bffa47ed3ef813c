//! Emoji and hashtag frequency counting over a set of tweets.

use std::collections::HashMap;

use crate::platform::Post;

/// Occurrence counts per token, remembering the order tokens were first seen.
///
/// Insertion order is what [`FrequencyCount::top`] uses to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCount {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `token`.
    pub fn increment(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    /// Count for `token`, zero when it never occurred.
    pub fn get(&self, token: &str) -> u64 {
        self.index
            .get(token)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// The token with the highest count. Among equal counts the token seen
    /// first wins.
    pub fn top(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for entry in &self.entries {
            if best.map_or(true, |current| entry.1 > current.1) {
                best = Some(entry);
            }
        }
        best.map(|(token, _)| token.as_str())
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokens and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Plain map view, for order-insensitive comparisons.
    pub fn to_map(&self) -> HashMap<String, u64> {
        self.entries.iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyCount {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = FrequencyCount::new();
        for token in iter {
            counts.increment(token);
        }
        counts
    }
}

/// Emoji and hashtag counts for a set of tweets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetStats {
    pub emojis: FrequencyCount,
    pub hashtags: FrequencyCount,
}

/// Fitzpatrick skin-tone modifiers, counted as emoji of their own.
const SKIN_TONES: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Returns true if `c` on its own is an emoji in the Unicode emoji table.
///
/// ASCII characters (`#`, `*`, digits) are only emoji as part of keycap
/// sequences, so they never count on their own. Skin-tone modifiers are not
/// in the table as standalone entries but do count, so `👍🏻` is two emoji.
pub fn is_emoji(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    if SKIN_TONES.contains(&c) {
        return true;
    }
    let mut buf = [0u8; 4];
    emojis::get(c.encode_utf8(&mut buf)).is_some()
}

/// Counts emoji characters and `#`-prefixed whitespace-delimited tokens
/// across all tweet texts. Hashtags are counted verbatim (no case folding,
/// trailing punctuation kept).
pub fn analyze_tweets(posts: &[Post]) -> TweetStats {
    let mut stats = TweetStats::default();
    let mut buf = [0u8; 4];

    for post in posts {
        for c in post.text.chars().filter(|&c| is_emoji(c)) {
            stats.emojis.increment(c.encode_utf8(&mut buf));
        }
        for word in post.text.split_whitespace() {
            if word.starts_with('#') {
                stats.hashtags.increment(word);
            }
        }
    }

    stats
}
