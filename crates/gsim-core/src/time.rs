//! Recorder timestamps.
//!
//! `RecordEvent.timestamp` is a monotonic integer: two events never share a
//! timestamp unless produced in the same atomic commit, and timestamps are
//! strictly non-decreasing. `std::time::Instant` alone doesn't guarantee the
//! first property on every platform at high emission rates, so
//! `MonotonicClock` nudges ties forward by one nanosecond. It never tracks
//! wall-clock time, only a process-local sequence.

use std::fmt;
use std::time::Instant;

/// A monotonic timestamp, nanosecond-scale, as recorded in a `RecordEvent`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Issues strictly non-decreasing [`Timestamp`]s, ticking ties forward by 1ns
/// so two events emitted back-to-back never compare equal.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
    last: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last: 0,
        }
    }

    /// Issue the next timestamp. Guaranteed `> ` every prior value from this clock.
    pub fn next(&mut self) -> Timestamp {
        let now = self.epoch.elapsed().as_nanos() as u64;
        let stamped = if now > self.last { now } else { self.last + 1 };
        self.last = stamped;
        Timestamp(stamped)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
