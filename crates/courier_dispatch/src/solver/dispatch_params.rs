use jiff::civil::{Time, time};

/// Time of day every vehicle becomes available.
pub const DEFAULT_DAY_START: Time = time(8, 0, 0, 0);

#[derive(Clone, Debug)]
pub struct DispatchParams {
    pub day_start: Time,
    pub scoring_threads: Threads,
}

impl Default for DispatchParams {
    fn default() -> Self {
        DispatchParams {
            day_start: DEFAULT_DAY_START,
            scoring_threads: Threads::Single,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.number_of_threads() > 1
    }
}

impl From<Option<usize>> for Threads {
    fn from(threads: Option<usize>) -> Self {
        match threads {
            None => Threads::Auto,
            Some(0 | 1) => Threads::Single,
            Some(num) => Threads::Multi(num),
        }
    }
}
