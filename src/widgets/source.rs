//! Where the clock reads the current time from.

use chrono::{Local, NaiveTime};
use std::fmt;

/// Source of the current wall-clock time.
pub trait TimeSource: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveTime;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that starts at a fixed time and advances with tokio's clock.
///
/// Under a paused runtime it moves only when tokio time is advanced.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualTime {
    start: NaiveTime,
    origin: tokio::time::Instant,
}

#[cfg(test)]
impl ManualTime {
    pub fn starting_at(start: NaiveTime) -> Self {
        Self {
            start,
            origin: tokio::time::Instant::now(),
        }
    }
}

#[cfg(test)]
impl TimeSource for ManualTime {
    fn now(&self) -> NaiveTime {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed()).unwrap();
        self.start + elapsed
    }
}
