//! Statistics service implementation

use crate::config::{SharedConfig, keys, models};
use crate::error::Result;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{info, warn};

/// Display value for a document that has never recorded a launch
pub const NEVER_PLAYED: &str = "Never";

/// Naive local ISO-8601 stamp with microseconds
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");

/// Play statistics prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    /// Number of launches
    pub play_count: u64,
    /// Raw stored stamp, empty when never played
    pub last_played: String,
    /// Calendar date of the last launch, or [`NEVER_PLAYED`]
    pub last_played_display: String,
}

/// Reads and records play statistics through the shared store
#[derive(Debug, Clone)]
pub struct StatsService {
    config: SharedConfig,
}

impl StatsService {
    /// Create a service over the shared store
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Record a launch stamped with the current local time
    ///
    /// Returns the stamp that was stored.
    pub fn record_play(&self) -> Result<String> {
        let stamp = current_timestamp()?;
        self.record_play_at(&stamp);
        Ok(stamp)
    }

    /// Record a launch with an explicit stamp, returning the new play count
    ///
    /// Count and stamp go to disk in one write.
    pub fn record_play_at(&self, stamp: &str) -> u64 {
        let mut store = self.config.lock();
        let previous = match store.get(keys::PLAY_COUNT) {
            None => 0,
            Some(value) => models::play_count_from_value(value).unwrap_or_else(|| {
                warn!("Stored play count {} is not a count, restarting from 0", value);
                0
            }),
        };
        let count = previous.saturating_add(1);
        store.update([
            (keys::PLAY_COUNT, Value::from(count)),
            (keys::LAST_PLAYED, Value::from(stamp)),
        ]);
        info!("Recorded play #{} at {}", count, stamp);
        count
    }

    /// Current statistics for display
    pub fn summary(&self) -> StatsSummary {
        let store = self.config.lock();
        let last_played = store.last_played();
        StatsSummary {
            play_count: store.play_count(),
            last_played_display: display_date(&last_played),
            last_played,
        }
    }
}

/// Date portion of a stored stamp: its first 10 characters, or "Never" when empty
pub fn display_date(last_played: &str) -> String {
    if last_played.is_empty() {
        NEVER_PLAYED.to_string()
    } else {
        last_played.chars().take(10).collect()
    }
}

/// Current local wall-clock time as a naive ISO-8601 stamp
///
/// Falls back to UTC when the local offset cannot be determined.
pub fn current_timestamp() -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(TIMESTAMP_FORMAT)?)
}
