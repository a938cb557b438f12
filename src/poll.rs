//! Fetch-versus-render timing policy.
//!
//! Rendering happens every tick. Outdoor data is refreshed only when the
//! clock has reached the sync deadline, which then moves one refresh
//! interval past the current time.

use crate::time::UnixTime;

/// Default outdoor refresh interval: one hour.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60 * 60;

/// Returns true once `now` has reached `next_sync_deadline`.
#[inline]
pub fn should_refetch(now: UnixTime, next_sync_deadline: UnixTime) -> bool {
    now >= next_sync_deadline
}

/// Tracks the next outdoor sync deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncSchedule {
    refresh_interval_secs: u64,
    next_deadline: UnixTime,
}

impl SyncSchedule {
    /// Creates a schedule that is due immediately.
    pub fn new(refresh_interval_secs: u64) -> Self {
        Self {
            refresh_interval_secs,
            next_deadline: 0,
        }
    }

    /// Returns true if a fetch is due at `now`, advancing the deadline when it is.
    ///
    /// The deadline moves whether or not the caller's fetch succeeds.
    pub fn poll(&mut self, now: UnixTime) -> bool {
        if !should_refetch(now, self.next_deadline) {
            return false;
        }
        self.next_deadline = now.saturating_add(self.refresh_interval_secs);
        true
    }

    /// Makes the next [`poll`](Self::poll) due regardless of the clock.
    pub fn expire(&mut self) {
        self.next_deadline = 0;
    }

    /// Time at which the next fetch becomes due.
    pub fn next_deadline(&self) -> UnixTime {
        self.next_deadline
    }

    /// Interval between fetches.
    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
    }
}

impl Default for SyncSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_is_always_due() {
        let mut schedule = SyncSchedule::new(3600);
        assert!(schedule.poll(0));
        assert_eq!(schedule.next_deadline(), 3600);
    }

    #[test]
    fn poll_waits_for_the_deadline() {
        let mut schedule = SyncSchedule::new(3600);
        assert!(schedule.poll(1_000));
        assert!(!schedule.poll(1_020));
        assert!(!schedule.poll(4_599));
        assert!(schedule.poll(4_600));
        assert_eq!(schedule.next_deadline(), 8_200);
    }

    #[test]
    fn deadline_saturates_near_the_end_of_time() {
        let mut schedule = SyncSchedule::new(3600);
        assert!(schedule.poll(u64::MAX - 10));
        assert_eq!(schedule.next_deadline(), u64::MAX);
    }

    #[test]
    fn expire_forces_a_refetch() {
        let mut schedule = SyncSchedule::new(3600);
        assert!(schedule.poll(100));
        schedule.expire();
        assert!(schedule.poll(101));
    }
}
