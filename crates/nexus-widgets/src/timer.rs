//! Deterministic timeouts and intervals on a virtual millisecond clock.

use std::collections::{BTreeSet, HashMap};

/// Opaque handle of a scheduled timer. Handles are never reused within one
/// queue, so a stale handle can only ever miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    /// Deadline the timer fired at; the queue clock equals it afterwards.
    pub at: u64,
    pub event: E,
}

#[derive(Debug)]
struct Timer<E> {
    deadline: u64,
    period: Option<u64>,
    event: E,
}

/// A set of pending timers plus the clock they are measured against.
///
/// Timers due at the same instant fire in the order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: u64,
    next_handle: u64,
    order: BTreeSet<(u64, TimerHandle)>,
    timers: HashMap<TimerHandle, Timer<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_handle: 0,
            order: BTreeSet::new(),
            timers: HashMap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.order.first().map(|(deadline, _)| *deadline)
    }

    /// Schedules `event` to fire once, `delay` milliseconds from now.
    pub fn schedule_timeout(&mut self, delay: u64, event: E) -> TimerHandle {
        self.insert(self.now.saturating_add(delay), None, event)
    }

    /// Schedules `event` to fire every `period` milliseconds, starting one
    /// period from now, until cancelled. A zero period is treated as 1.
    pub fn schedule_interval(&mut self, period: u64, event: E) -> TimerHandle {
        let period = period.max(1);
        self.insert(self.now.saturating_add(period), Some(period), event)
    }

    /// Releases a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.remove(&handle) {
            Some(timer) => {
                self.order.remove(&(timer.deadline, handle));
                true
            }
            None => false,
        }
    }

    /// Releases every pending timer. The clock is left untouched.
    pub fn clear(&mut self) {
        self.order.clear();
        self.timers.clear();
    }

    /// Moves the clock forward to `until` without firing anything. Callers
    /// drain [`TimerQueue::pop_due`] first; the clock never moves backwards.
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, deadline: u64, period: Option<u64>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.order.insert((deadline, handle));
        self.timers.insert(
            handle,
            Timer {
                deadline,
                period,
                event,
            },
        );
        handle
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Removes the earliest timer due at or before `until` and moves the
    /// clock to its deadline. Intervals are re-armed one period later under
    /// the same handle.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<E>> {
        let &(deadline, handle) = self.order.first()?;
        if deadline > until {
            return None;
        }

        self.order.remove(&(deadline, handle));
        self.now = self.now.max(deadline);

        let (event, period) = {
            let timer = self.timers.get(&handle)?;
            (timer.event.clone(), timer.period)
        };

        match period {
            Some(period) => {
                let next = deadline.saturating_add(period);
                if let Some(timer) = self.timers.get_mut(&handle) {
                    timer.deadline = next;
                }
                self.order.insert((next, handle));
            }
            None => {
                self.timers.remove(&handle);
            }
        }

        Some(Fired {
            at: deadline,
            event,
        })
    }
}
