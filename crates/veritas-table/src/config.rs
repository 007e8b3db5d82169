//! Configuration for a table session.

use serde::{Deserialize, Serialize};

/// Default number of rolls kept in the recent-rolls feed.
pub const DEFAULT_ROLL_LOG_CAPACITY: usize = 50;
/// Default refresh interval advertised to the stream overlay.
pub const DEFAULT_STREAM_REFRESH_MS: u64 = 2000;

/// Configuration for a table session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How many rolls the recent-rolls feed keeps (at least 1).
    pub roll_log_capacity: usize,
    /// How often the stream overlay should poll, in milliseconds.
    pub stream_refresh_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            roll_log_capacity: DEFAULT_ROLL_LOG_CAPACITY,
            stream_refresh_ms: DEFAULT_STREAM_REFRESH_MS,
        }
    }
}

impl TableConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the roll feed capacity (clamped to at least 1).
    pub fn with_roll_log_capacity(mut self, capacity: usize) -> Self {
        self.roll_log_capacity = capacity.max(1);
        self
    }

    /// Set the stream refresh interval.
    pub fn with_stream_refresh_ms(mut self, ms: u64) -> Self {
        self.stream_refresh_ms = ms;
        self
    }
}
