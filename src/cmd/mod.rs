pub mod batch;
pub mod leaderboard;
pub mod simulate;

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock milliseconds, used only to stamp export file names.
pub fn unix_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
