//! Play statistics module
//!
//! Derives the play-count / last-played summary from the settings document
//! and records each launch. Nothing here is persisted separately: the summary
//! is always recomputed from the store.

pub mod service;

pub use service::{NEVER_PLAYED, StatsService, StatsSummary, current_timestamp, display_date};
