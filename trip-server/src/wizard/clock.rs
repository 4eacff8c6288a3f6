//! Time source for the wizard.

use chrono::{Local, NaiveDateTime, Timelike, Utc};

/// Supplies the current local wall-clock time.
///
/// The wizard reads the clock for default timestamps and for the weekend
/// surge, so tests inject a [`FixedClock`].
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Current time truncated to the minute, as a `datetime-local` input holds it.
    fn now_minute(&self) -> NaiveDateTime {
        let now = self.now();
        now.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    }
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// The system clock as UTC wall time.
///
/// Used by the server, whose stored timestamps are all UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
