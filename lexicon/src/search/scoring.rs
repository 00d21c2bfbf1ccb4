//! Match scoring for dictionary search
//!
//! A word is scored against a query by the strongest way it matches:
//! exact match beats prefix match beats substring match. Words that do not
//! contain the query at all are not scored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a word matched the query. Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Query appears somewhere inside the word
    Substring = 1,

    /// Word starts with the query
    Prefix = 2,

    /// Word equals the query
    Exact = 3,
}

impl MatchKind {
    /// Numeric score used for ranking
    pub fn score(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::Prefix => write!(f, "prefix"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Score `word` against an already lower-cased, non-empty `query`.
pub fn score_match(word: &str, query: &str) -> Option<MatchKind> {
    let word = word.to_lowercase();

    if word == query {
        Some(MatchKind::Exact)
    } else if word.starts_with(query) {
        Some(MatchKind::Prefix)
    } else if word.contains(query) {
        Some(MatchKind::Substring)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_kinds() {
        assert_eq!(score_match("bet", "bet"), Some(MatchKind::Exact));
        assert_eq!(score_match("Beta", "bet"), Some(MatchKind::Prefix));
        assert_eq!(score_match("alphabet", "bet"), Some(MatchKind::Substring));
        assert_eq!(score_match("cab", "bet"), None);
    }

    #[test]
    fn test_ordering_and_scores() {
        assert!(MatchKind::Exact > MatchKind::Prefix);
        assert!(MatchKind::Prefix > MatchKind::Substring);
        assert_eq!(MatchKind::Exact.score(), 3);
        assert_eq!(MatchKind::Prefix.score(), 2);
        assert_eq!(MatchKind::Substring.score(), 1);
    }
}
