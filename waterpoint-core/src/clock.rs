//! Time sources for the store.
//!
//! The store stamps `last_update` and report dates itself, so it takes the
//! current time from a [`Clock`] rather than reading the system time directly.

use std::cell::Cell;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Supplies the current time.
pub trait Clock {
    /// The current instant, truncated to whole milliseconds.
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        // Persisted timestamps carry milliseconds; truncating here keeps a
        // record equal to itself after a save/load cycle.
        Utc::now().trunc_subsecs(3)
    }
}

/// A clock that only moves when told to.
///
/// Instants handed to it are truncated to whole milliseconds, like
/// [`SystemClock`].
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use waterpoint_core::{Clock, FixedClock};
///
/// let start = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
/// let clock = FixedClock::new(start);
/// clock.advance(TimeDelta::hours(2));
/// assert_eq!(clock.now(), start + TimeDelta::hours(2));
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// Start the clock at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now.trunc_subsecs(3)),
        }
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now.trunc_subsecs(3));
    }

    /// Move forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set((self.now.get() + delta).trunc_subsecs(3));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
