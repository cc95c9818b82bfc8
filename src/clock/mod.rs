//! Clock sources for the timer.
//!
//! The timer never sleeps on its own. It asks a [`Clock`] for a recurring
//! ticker or a one-shot deadline and receives a [`TimerHandle`]; the clock
//! later reports [`ClockEvent`]s carrying that handle. Events whose handle
//! has since been cancelled are stale and are ignored by the receiver,
//! which is what makes cancellation deterministic.
//!
//! - [`TokioClock`]: real time, backed by `tokio::time`
//! - [`ManualClock`]: virtual time advanced explicitly by tests

mod manual;
mod tokio_clock;

use std::fmt;
use std::time::Duration;

pub use manual::ManualClock;
pub use tokio_clock::TokioClock;

/// Cadence of the countdown ticker.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies a ticker or deadline issued by a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Callback delivered by a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// A recurring ticker fired
    Tick(TimerHandle),
    /// A one-shot deadline elapsed
    Deadline(TimerHandle),
}

impl ClockEvent {
    pub fn handle(&self) -> TimerHandle {
        match self {
            ClockEvent::Tick(handle) | ClockEvent::Deadline(handle) => *handle,
        }
    }
}

/// Source of recurring ticks and one-shot deadlines.
pub trait Clock {
    /// Starts a ticker firing every `period`, first after one full period.
    fn start_ticker(&mut self, period: Duration) -> TimerHandle;

    /// Schedules a single deadline `delay` from now.
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle;

    /// Cancels a ticker or deadline. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}
