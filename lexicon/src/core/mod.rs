//! Core dictionary functionality

pub mod clock;
pub mod dictionary;
pub mod history;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dictionary::DictionaryStore;
pub use history::SearchHistoryLedger;
