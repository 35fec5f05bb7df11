//! Deferred one-shot actions keyed by deadline.
//!
//! [`TimerManager`] does not read the clock itself. Callers pass `now` into
//! every time-dependent method, so a host event loop (or a test) decides
//! when time advances.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{DragListError, Result};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a pending timer.
    pub struct TimerId;
}

#[derive(Debug)]
struct TimerData<A> {
    deadline: Instant,
    action: A,
}

/// An entry in the timer queue (min-heap by deadline).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the earliest deadline is on top.
        other.deadline.cmp(&self.deadline)
    }
}

/// Holds one-shot timers, each carrying an action payload `A` that is
/// handed back when the timer expires.
#[derive(Debug)]
pub struct TimerManager<A> {
    timers: SlotMap<TimerId, TimerData<A>>,
    queue: BinaryHeap<TimerQueueEntry>,
}

impl<A> TimerManager<A> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule `action` to expire `delay` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, delay: Duration, action: A) -> TimerId {
        let deadline = now + delay;
        let id = self.timers.insert(TimerData { deadline, action });
        self.queue.push(TimerQueueEntry { id, deadline });
        tracing::trace!(target: targets::TIMER, ?id, ?delay, "timer started");
        id
    }

    /// Cancel a pending timer, returning its action.
    pub fn stop(&mut self, id: TimerId) -> Result<A> {
        self.timers
            .remove(id)
            .map(|data| data.action)
            .ok_or(DragListError::InvalidTimer)
    }

    /// Whether `id` is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Time remaining until the earliest deadline, saturating at zero.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first.
    #[tracing::instrument(skip_all, target = "draglist_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<(TimerId, A)> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.deadline > now {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their queue entry behind.
            let Some(data) = self.timers.remove(entry.id) else {
                continue;
            };

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push((entry.id, data.action));
        }

        fired
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<A> Default for TimerManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(t0, Duration::from_millis(50), "hide");

        assert!(timers.process_expired(t0 + Duration::from_millis(49)).is_empty());
        assert!(timers.is_active(id));

        let fired = timers.process_expired(t0 + Duration::from_millis(50));
        assert_eq!(fired, vec![(id, "hide")]);
        assert!(!timers.is_active(id));
        assert!(timers.process_expired(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let t0 = Instant::now();
        let mut timers = TimerManager::new();
        timers.start_one_shot(t0, Duration::from_millis(30), 2);
        timers.start_one_shot(t0, Duration::from_millis(10), 1);
        timers.start_one_shot(t0, Duration::from_millis(90), 3);

        let fired: Vec<i32> = timers
            .process_expired(t0 + Duration::from_millis(40))
            .into_iter()
            .map(|(_, a)| a)
            .collect();
        assert_eq!(fired, vec![1, 2]);
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_stop_cancels_and_reports_unknown() {
        let t0 = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(t0, Duration::from_millis(10), ());

        assert!(timers.stop(id).is_ok());
        assert!(matches!(timers.stop(id), Err(DragListError::InvalidTimer)));
        assert!(timers.process_expired(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_next_deadline_skips_stopped() {
        let t0 = Instant::now();
        let mut timers = TimerManager::new();
        let early = timers.start_one_shot(t0, Duration::from_millis(10), ());
        timers.start_one_shot(t0, Duration::from_millis(20), ());

        timers.stop(early).unwrap();

        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(20)));
        assert_eq!(
            timers.time_until_next(t0 + Duration::from_millis(25)),
            Some(Duration::ZERO)
        );
    }
}
