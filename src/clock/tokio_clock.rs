//! Real-time clock built on `tokio::time`.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::debug;

use super::{Clock, ClockEvent, TimerHandle};

/// Clock that spawns one tokio task per ticker or deadline.
///
/// Events are delivered on the channel returned by [`TokioClock::new`].
/// Cancelling aborts the task; an event already queued before the abort
/// still arrives and must be discarded by the receiver as stale.
///
/// Must be used from within a tokio runtime.
pub struct TokioClock {
    events: mpsc::UnboundedSender<ClockEvent>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioClock {
    /// Creates a clock and the receiver its events are delivered to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClockEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let clock = Self {
            events,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (clock, rx)
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerHandle::new(self.next_id)
    }

    /// Number of tasks still alive.
    pub fn live_tasks(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Clock for TokioClock {
    fn start_ticker(&mut self, period: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let tx = self.events.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(ClockEvent::Tick(handle)).is_err() {
                    break;
                }
            }
        });

        debug!(%handle, ?period, "ticker started");
        self.tasks.insert(handle, task);
        handle
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let tx = self.events.clone();

        let task = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(ClockEvent::Deadline(handle));
        });

        debug!(%handle, ?delay, "deadline scheduled");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!(%handle, "timer cancelled");
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TokioClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioClock")
            .field("tasks", &self.tasks.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
