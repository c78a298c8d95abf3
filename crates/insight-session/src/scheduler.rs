//! Deferred task queue
//!
//! Every delayed transition of a session (search latency, modal staging,
//! overlay exit) is an entry in this queue, keyed by its deadline on a
//! virtual clock. Entries are cancelable through the [`ScheduleToken`]
//! returned when they were scheduled, so a newer transition can always
//! retire the callback of the one it supersedes.
//!
//! The queue never sleeps. Whoever owns it moves the clock forward and
//! drains the entries that became due.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleToken {
    /// Deadline on the queue's clock
    pub deadline: Duration,
    /// Monotonic sequence number; breaks ties between equal deadlines
    pub sequence: u64,
}

/// Deadline-ordered queue of pending events
#[derive(Debug)]
pub struct DeferredQueue<E> {
    now: Duration,
    next_sequence: u64,
    pending: BTreeMap<(Duration, u64), E>,
}

impl<E> DeferredQueue<E> {
    /// Empty queue with its clock at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_sequence: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current position of the virtual clock
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` after the current clock
    pub fn schedule(&mut self, delay: Duration, event: E) -> ScheduleToken {
        let token = ScheduleToken {
            deadline: self.now + delay,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.pending.insert((token.deadline, token.sequence), event);
        token
    }

    /// Drop a scheduled entry; false if it already fired or was cancelled
    pub fn cancel(&mut self, token: ScheduleToken) -> bool {
        self.pending
            .remove(&(token.deadline, token.sequence))
            .is_some()
    }

    /// Deadline of the earliest entry
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest entry due at or before `limit`
    ///
    /// The clock moves to that entry's deadline, so anything scheduled while
    /// handling it is relative to the moment it fired.
    pub fn pop_due(&mut self, limit: Duration) -> Option<(ScheduleToken, E)> {
        let entry = self.pending.first_entry()?;
        if entry.key().0 > limit {
            return None;
        }
        let ((deadline, sequence), event) = entry.remove_entry();
        self.now = self.now.max(deadline);
        Some((ScheduleToken { deadline, sequence }, event))
    }

    /// Move the clock forward; never backwards
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for DeferredQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_deadline_then_sequence_order() {
        let mut q = DeferredQueue::new();
        q.schedule(ms(300), "close");
        q.schedule(ms(20), "open");
        q.schedule(ms(20), "open-again");

        let order: Vec<_> = std::iter::from_fn(|| q.pop_due(ms(1_000)).map(|(_, e)| e)).collect();
        assert_eq!(order, vec!["open", "open-again", "close"]);
        assert_eq!(q.now(), ms(300));
    }

    #[test]
    fn entries_past_limit_stay_queued() {
        let mut q = DeferredQueue::new();
        q.schedule(ms(1_500), ());
        assert!(q.pop_due(ms(1_499)).is_none());
        assert_eq!(q.next_deadline(), Some(ms(1_500)));
        assert!(q.pop_due(ms(1_500)).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let mut q = DeferredQueue::new();
        let t = q.schedule(ms(20), 1);
        q.schedule(ms(30), 2);
        assert!(q.cancel(t));
        assert!(!q.cancel(t));
        assert_eq!(q.pop_due(ms(100)).map(|(_, e)| e), Some(2));
    }

    #[test]
    fn schedules_are_relative_to_the_clock() {
        let mut q: DeferredQueue<()> = DeferredQueue::new();
        q.advance_clock(ms(500));
        q.advance_clock(ms(100));
        let t = q.schedule(ms(20), ());
        assert_eq!(t.deadline, ms(520));
    }
}
