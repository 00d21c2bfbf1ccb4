//! Dictionary search ranking
//!
//! Queries are matched against every word and ranked by match strength:
//! exact (3) over prefix (2) over substring (1). Non-matching words are dropped.
//!
//! # Example
//!
//! ```
//! use lexicon::models::WordEntry;
//! use lexicon::search::{MatchKind, SearchRanker};
//!
//! let entries = vec![WordEntry::new("alphabet"), WordEntry::new("beta"), WordEntry::new("bet")];
//! let hits = SearchRanker::new().rank(&entries, "bet", 10);
//!
//! assert_eq!(hits[0].entry.word, "bet");
//! assert_eq!(hits[0].kind, MatchKind::Exact);
//! assert_eq!(hits[1].entry.word, "beta");
//! assert_eq!(hits[2].entry.word, "alphabet");
//! ```

pub mod ranker;
pub mod scoring;

pub use ranker::{SearchHit, SearchRanker};
pub use scoring::{MatchKind, score_match};
