use jiff::{SignedDuration, civil::DateTime};
use serde::Serialize;

/// Interval within which a pickup has to happen, both ends included.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    earliest: DateTime,
    latest: DateTime,
}

impl TimeWindow {
    pub fn new(earliest: DateTime, latest: DateTime) -> Self {
        TimeWindow { earliest, latest }
    }

    pub fn earliest(&self) -> DateTime {
        self.earliest
    }

    pub fn latest(&self) -> DateTime {
        self.latest
    }

    pub fn is_empty(&self) -> bool {
        self.earliest > self.latest
    }

    pub fn is_satisfied(&self, arrival: DateTime) -> bool {
        self.earliest <= arrival && arrival <= self.latest
    }

    /// Time left between `arrival` and the end of the window, negative once past it.
    pub fn slack(&self, arrival: DateTime) -> SignedDuration {
        arrival.duration_until(self.latest)
    }
}
