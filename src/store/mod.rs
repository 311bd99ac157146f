//! In-memory stores for relay calls.
//!
//! The Request Store and Response Store share one identifier space and one
//! lock; both live in [`RelayJournal`]. Nothing is evicted.

pub mod journal;

pub use journal::{JournalEntry, JournalStats, RelayJournal};
