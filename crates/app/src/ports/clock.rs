//! Clock port — local wall-clock time for condition evaluation.

use chrono::{NaiveDate, NaiveTime};

/// Source of the local time-of-day and calendar date.
///
/// A trait so tests can pin the clock; production code uses [`SystemClock`].
pub trait Clock {
    /// Current local wall-clock time and date.
    fn now(&self) -> (NaiveTime, NaiveDate);
}

/// System clock in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> (NaiveTime, NaiveDate) {
        let now = chrono::Local::now();
        (now.time(), now.date_naive())
    }
}
