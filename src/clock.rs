//! Wall-clock and local-calendar source for the engine
//!
//! Streaks and period comparisons depend on "now" and on which calendar
//! day an instant falls on for the user. Both are read through [`Clock`]
//! so callers can pin them.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Source of the current instant and of local calendar days
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Local calendar day of an instant for the observing user
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Local calendar day of [`Clock::now`]
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).local_date(instant)
    }
}

/// Reads the system clock and the host's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// A clock frozen at one instant, observed from a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        FixedClock { now, offset }
    }

    /// Frozen clock observed from UTC
    pub fn utc(now: DateTime<Utc>) -> Self {
        FixedClock::new(now, utc_offset())
    }

    /// Frozen clock at a wall-clock time in the given offset.
    ///
    /// Returns None when the local time does not map to a single instant.
    pub fn at_local(local: NaiveDateTime, offset: FixedOffset) -> Option<Self> {
        offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| FixedClock::new(dt.with_timezone(&Utc), offset))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}
