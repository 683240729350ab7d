//! The resolved `(start, end)` pair.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive UTC time range. Serializes as
/// `{"start": "<RFC 3339>", "end": "<RFC 3339>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timespan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Timespan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `end - start`. Negative when a caller-supplied `start`/`end` pair is inverted.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls within the range, both bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
