//! Relative look-back windows used to filter tweets by age.

use chrono::Duration;
use std::fmt;

/// A named look-back window. "No timeframe" is `Option::None` at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Timeframe {
    /// Keyword scan order. The first keyword found in a mention wins.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
        Timeframe::Yearly,
    ];

    /// Fixed look-back length in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            Timeframe::Daily => 86_400,
            Timeframe::Weekly => 604_800,
            Timeframe::Monthly => 2_592_000,
            Timeframe::Yearly => 31_536_000,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::seconds(self.seconds())
    }

    /// The lowercase keyword that selects this timeframe in a mention.
    pub fn keyword(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        }
    }

    /// Capitalized label used in the stats header, e.g. `Daily`.
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
            Timeframe::Yearly => "Yearly",
        }
    }

    /// Finds the first timeframe keyword (in [`Timeframe::ALL`] order) that
    /// occurs anywhere in `text`. Matching is case-insensitive.
    pub fn find_in(text: &str) -> Option<Timeframe> {
        let lowered = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|timeframe| lowered.contains(timeframe.keyword()))
    }

    /// Parses an exact keyword such as `weekly`.
    pub fn from_keyword(keyword: &str) -> Option<Timeframe> {
        let keyword = keyword.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|timeframe| timeframe.keyword() == keyword)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        assert_eq!(Timeframe::Daily.seconds(), 86_400);
        assert_eq!(Timeframe::Weekly.seconds(), 604_800);
        assert_eq!(Timeframe::Monthly.seconds(), 2_592_000);
        assert_eq!(Timeframe::Yearly.seconds(), 31_536_000);
        assert_eq!(Timeframe::Weekly.duration(), Duration::days(7));
    }

    #[test]
    fn test_find_in_uses_fixed_order() {
        assert_eq!(Timeframe::find_in("my stats"), None);
        assert_eq!(
            Timeframe::find_in("@bot my stats YEARLY please"),
            Some(Timeframe::Yearly)
        );
        // "daily" is checked before "weekly" regardless of position in the text
        assert_eq!(
            Timeframe::find_in("weekly or daily?"),
            Some(Timeframe::Daily)
        );
        // substring match, not word match
        assert_eq!(
            Timeframe::find_in("biweekly digest"),
            Some(Timeframe::Weekly)
        );
    }

    #[test]
    fn test_keywords_and_labels() {
        assert_eq!(Timeframe::from_keyword(" Monthly "), Some(Timeframe::Monthly));
        assert_eq!(Timeframe::from_keyword("hourly"), None);
        assert_eq!(Timeframe::Daily.label(), "Daily");
        assert_eq!(Timeframe::Yearly.to_string(), "yearly");
    }
}
