//! Clocks and a deferred-action queue polled by the event loop.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock, seconds since the Unix epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

struct Timer<A> {
    due: f64,
    seq: u64,
    action: A,
}

impl<A> PartialEq for Timer<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A> Eq for Timer<A> {}

impl<A> PartialOrd for Timer<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Timer<A> {
    // reversed so the max-heap pops the earliest timer first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of actions keyed by due time. Equal due times fire in scheduling order.
pub struct TimerQueue<A> {
    heap: BinaryHeap<Timer<A>>,
    next_seq: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }

    pub fn schedule(&mut self, due: f64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Timer { due, seq, action });
    }

    /// Remove and return every action due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<A> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|t| t.due <= now) {
            if let Some(timer) = self.heap.pop() {
                due.push(timer.action);
            }
        }
        due
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|t| t.due)
    }

    /// Drop all pending actions, returning how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let n = self.heap.len();
        self.heap.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(3.0, "c");
        q.schedule(1.0, "a");
        q.schedule(2.0, "b");
        assert_eq!(q.next_due(), Some(1.0));
        assert_eq!(q.pop_due(2.5), vec!["a", "b"]);
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(2.9).is_empty());
        assert_eq!(q.pop_due(3.0), vec!["c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut q = TimerQueue::new();
        for i in 0..10 {
            q.schedule(5.0, i);
        }
        assert_eq!(q.pop_due(5.0), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_clear_cancels() {
        let mut q = TimerQueue::new();
        q.schedule(1.0, ());
        q.schedule(2.0, ());
        assert_eq!(q.clear(), 2);
        assert!(q.pop_due(10.0).is_empty());
        assert_eq!(q.next_due(), None);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(10.0);
        let other = clock.clone();
        clock.advance(0.5);
        assert_eq!(other.now(), 10.5);
        other.set(1.0);
        assert_eq!(clock.now(), 1.0);
    }

    #[test]
    fn test_system_clock_is_epoch_seconds() {
        assert!(SystemClock.now() > 1_000_000_000.0);
    }
}
