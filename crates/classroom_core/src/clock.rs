//! Time source injected into stores and derived queries.

use chrono::{NaiveDate, Utc};

/// Wall-clock abstraction so date-dependent behavior stays testable.
pub trait Clock {
    /// Current calendar date (UTC).
    fn today(&self) -> NaiveDate;
    /// Current instant as Unix epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
    now_millis: i64,
}

impl FixedClock {
    /// Pins the clock to midnight UTC of `today`.
    pub fn new(today: NaiveDate) -> Self {
        let now_millis = today
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { today, now_millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.now_millis
    }
}
