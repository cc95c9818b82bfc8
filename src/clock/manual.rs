//! Virtual-time clock for deterministic tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Clock, ClockEvent, TimerHandle};

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl ManualState {
    fn issue(&mut self, due: Duration, period: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.entries.push(Entry {
            handle,
            due,
            period,
        });
        handle
    }

    /// Pops the earliest entry due at or before `until`, moving time forward to it.
    fn pop_due(&mut self, until: Duration) -> Option<ClockEvent> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.handle))
            .map(|(index, _)| index)?;

        let due = self.entries[index].due;
        self.now = self.now.max(due);

        match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.due += period;
                Some(ClockEvent::Tick(entry.handle))
            }
            None => {
                let entry = self.entries.remove(index);
                Some(ClockEvent::Deadline(entry.handle))
            }
        }
    }
}

/// A clock whose time only moves when [`ManualClock::advance`] is called.
///
/// Clones share the same timeline, so a test can keep one clone for
/// driving time while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the clock was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().unwrap().now
    }

    /// Number of tickers currently running.
    #[must_use]
    pub fn active_tickers(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|entry| entry.period.is_some())
            .count()
    }

    /// Number of one-shot deadlines not yet fired or cancelled.
    #[must_use]
    pub fn pending_deadlines(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|entry| entry.period.is_none())
            .count()
    }

    /// Returns true if `handle` is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .any(|entry| entry.handle == handle)
    }

    /// Moves time forward by `by`, delivering every event that falls due in order.
    ///
    /// The lock is released before each delivery so the receiver may
    /// schedule or cancel timers on this clock from inside `deliver`.
    pub fn advance<F>(&self, by: Duration, mut deliver: F)
    where
        F: FnMut(ClockEvent),
    {
        let until = self.now() + by;
        loop {
            let next = self.inner.lock().unwrap().pop_due(until);
            match next {
                Some(event) => deliver(event),
                None => break,
            }
        }
        self.inner.lock().unwrap().now = until;
    }
}

impl Clock for ManualClock {
    fn start_ticker(&mut self, period: Duration) -> TimerHandle {
        let mut state = self.inner.lock().unwrap();
        let due = state.now + period;
        state.issue(due, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        let mut state = self.inner.lock().unwrap();
        let due = state.now + delay;
        state.issue(due, None)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner
            .lock()
            .unwrap()
            .entries
            .retain(|entry| entry.handle != handle);
    }
}
