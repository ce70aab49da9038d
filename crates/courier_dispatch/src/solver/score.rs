use std::fmt;

use jiff::SignedDuration;
use serde::Serialize;

/// Desirability of a (vehicle, request) match, higher is better.
///
/// Expressed in minutes: slack left in the time window, minus the ride duration, minus the
/// approach duration.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MIN: Score = Score(f64::NEG_INFINITY);

    pub fn new(value: f64) -> Self {
        Score(value)
    }

    pub fn of(slack: SignedDuration, route: SignedDuration, pickup_travel: SignedDuration) -> Self {
        Score(minutes(slack) - minutes(route) - minutes(pickup_travel))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_better_than(&self, other: &Score) -> bool {
        self.0 > other.0
    }
}

fn minutes(duration: SignedDuration) -> f64 {
    duration.as_secs_f64() / 60.0
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
