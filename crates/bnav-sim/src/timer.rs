//! Cancellable repeating timer, polled against the host timebase.

use bnav_core::Millis;

/// A repeating due-time timer.
///
/// The owner holds at most one per logical concern, inside an `Option`:
/// dropping the value cancels the timer, and [`replace`](Self::replace)
/// swaps interval and due time in one step.  There is no registry to leak
/// stale timers into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatingTimer {
    interval_ms: u64,
    next_due: Millis,
}

impl RepeatingTimer {
    /// Create a timer that first fires `interval_ms` after `now`.
    ///
    /// `interval_ms` must be positive; the clock validates before
    /// constructing.
    pub fn new(now: Millis, interval_ms: u64) -> Self {
        debug_assert!(interval_ms > 0, "zero-interval timer would fire forever");
        Self {
            interval_ms,
            next_due: now.offset(interval_ms),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Atomically change the interval: the next fire is `interval_ms` after
    /// `now`, and the old cadence is gone.
    pub fn replace(&mut self, now: Millis, interval_ms: u64) {
        debug_assert!(interval_ms > 0);
        self.interval_ms = interval_ms;
        self.next_due = now.offset(interval_ms);
    }

    /// Number of fires that have come due by `now`; advances the due time
    /// past `now`.
    ///
    /// A host that polls late gets the missed fires in one batch — ticks are
    /// never dropped, merely delivered together.
    pub fn fire_due(&mut self, now: Millis) -> u32 {
        let mut fires = 0;
        while self.next_due <= now {
            fires += 1;
            self.next_due = self.next_due.offset(self.interval_ms);
        }
        fires
    }

    /// The instant of the next fire.
    pub fn next_due(&self) -> Millis {
        self.next_due
    }
}
