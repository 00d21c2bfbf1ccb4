//! Relevance ranking over dictionary entries

use serde::{Deserialize, Serialize};

use super::scoring::{MatchKind, score_match};
use crate::models::WordEntry;

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matched entry
    pub entry: WordEntry,

    /// How the entry matched the query
    pub kind: MatchKind,
}

/// Ranks dictionary entries against a query.
///
/// Every entry is scanned on each query. Results are ordered by match strength,
/// and entries with equal strength keep their dataset order, so output is fully
/// deterministic for a given dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchRanker;

impl SearchRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank `entries` against `term`, returning at most `limit` hits.
    ///
    /// The term is trimmed and compared case-insensitively. A blank term yields no hits.
    pub fn rank(&self, entries: &[WordEntry], term: &str, limit: usize) -> Vec<SearchHit> {
        let query = term.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = entries
            .iter()
            .filter_map(|entry| {
                score_match(&entry.word, &query).map(|kind| SearchHit {
                    entry: entry.clone(),
                    kind,
                })
            })
            .collect();

        // sort_by is stable: equal kinds stay in dataset order
        hits.sort_by(|a, b| b.kind.cmp(&a.kind));
        hits.truncate(limit);

        tracing::trace!(query = %query, hits = hits.len(), "Ranked search");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words.iter().map(|word| WordEntry::new(*word)).collect()
    }

    fn ranked_words(entries: &[WordEntry], term: &str, limit: usize) -> Vec<String> {
        SearchRanker::new()
            .rank(entries, term, limit)
            .into_iter()
            .map(|hit| hit.entry.word)
            .collect()
    }

    #[test]
    fn test_bet_beta_cab_scenario() {
        let dataset = entries(&["bet", "beta", "cab"]);
        assert_eq!(ranked_words(&dataset, "bet", 10), vec!["bet", "beta"]);
    }

    #[test]
    fn test_exact_match_ranks_first_for_every_word() {
        let dataset = entries(&["alphabet", "abet", "bet", "betting", "Bet365", "abetted"]);
        for entry in &dataset {
            let ranked = ranked_words(&dataset, &entry.word, 1);
            assert_eq!(ranked, vec![entry.word.clone()], "query {}", entry.word);
        }
    }

    #[test]
    fn test_prefix_outranks_substring_and_ties_keep_order() {
        let dataset = entries(&["alphabet", "betting", "abet", "beta", "bet"]);
        let hits = SearchRanker::new().rank(&dataset, "bet", 10);

        let ranked: Vec<_> = hits.iter().map(|hit| hit.entry.word.as_str()).collect();
        assert_eq!(ranked, vec!["bet", "betting", "beta", "alphabet", "abet"]);

        let kinds: Vec<_> = hits.iter().map(|hit| hit.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MatchKind::Exact,
                MatchKind::Prefix,
                MatchKind::Prefix,
                MatchKind::Substring,
                MatchKind::Substring,
            ]
        );
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let dataset = entries(&["Serendipity", "dip"]);
        assert_eq!(ranked_words(&dataset, "  DIP ", 10), vec!["dip", "Serendipity"]);
    }

    #[test]
    fn test_limit_and_blank_terms() {
        let dataset = entries(&["bet", "beta", "betting"]);
        assert_eq!(ranked_words(&dataset, "bet", 2), vec!["bet", "beta"]);
        assert!(ranked_words(&dataset, "bet", 0).is_empty());
        assert!(ranked_words(&dataset, "", 10).is_empty());
        assert!(ranked_words(&dataset, "   ", 10).is_empty());
        assert!(ranked_words(&dataset, "zzz", 10).is_empty());
    }
}
