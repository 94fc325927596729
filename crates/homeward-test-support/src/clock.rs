//! Test clock.

use chrono::{DateTime, TimeZone, Utc};
use homeward_core::clock::Clock;

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    /// 2026-01-15 10:00:00 UTC.
    fn default() -> Self {
        Self(Utc.timestamp_opt(1_768_471_200, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
