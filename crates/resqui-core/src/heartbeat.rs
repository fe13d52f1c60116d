//! Worker liveness classification.

use crate::time::parse_timestamp;
use crate::types::Worker;
use chrono::{DateTime, TimeDelta, Utc};

/// Minutes without a heartbeat before a worker counts as stale.
pub const STALE_AFTER_MINUTES: i64 = 30;

pub fn stale_threshold() -> TimeDelta {
    TimeDelta::minutes(STALE_AFTER_MINUTES)
}

/// Whether a heartbeat is older than the stale threshold at `now`.
///
/// A missing heartbeat counts as expired, and so does one that cannot be
/// parsed.
pub fn is_stale(heartbeat: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(raw) = heartbeat else {
        return true;
    };
    match parse_timestamp(raw) {
        Some(at) => now.signed_duration_since(at) > stale_threshold(),
        None => true,
    }
}

impl Worker {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        is_stale(self.heartbeat.as_deref(), now)
    }
}
