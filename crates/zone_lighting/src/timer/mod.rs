//! Host timer facility
//!
//! Lighting never owns a thread. Recurring work is expressed as timer
//! handles that the host fires from its own (single) event loop; the
//! manager then routes each fired handle to whoever scheduled it.
//!
//! [`FrameScheduler`] is the cooperative implementation used when the
//! embedding application drives time itself through `advance`.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled recurring timer
    pub struct TimerHandle;
}

/// Timer facility provided by the host
pub trait TimerFacility {
    /// Schedule a recurring timer firing every `interval`
    fn schedule_recurring(&mut self, interval: Duration) -> TimerHandle;

    /// Cancel a timer
    ///
    /// Cancelling an unknown or already cancelled handle does nothing.
    fn cancel(&mut self, handle: TimerHandle);

    /// Whether the handle still refers to a scheduled timer
    fn is_active(&self, handle: TimerHandle) -> bool;

    /// Advance time and return the handles that fired, in firing order
    fn advance(&mut self, elapsed: Duration) -> Vec<TimerHandle>;
}

#[derive(Debug, Clone)]
struct RecurringTimer {
    interval: Duration,
    accumulated: Duration,
}

/// Cooperative scheduler driven by elapsed frame time
#[derive(Debug, Default)]
pub struct FrameScheduler {
    timers: SlotMap<TimerHandle, RecurringTimer>,
}

impl FrameScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled timers
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl TimerFacility for FrameScheduler {
    fn schedule_recurring(&mut self, interval: Duration) -> TimerHandle {
        // A zero interval would fire unboundedly per advance
        let interval = interval.max(Duration::from_micros(1));
        let handle = self.timers.insert(RecurringTimer {
            interval,
            accumulated: Duration::ZERO,
        });
        log::trace!("Scheduled recurring timer {:?} every {:?}", handle, interval);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.timers.remove(handle).is_some() {
            log::trace!("Cancelled timer {:?}", handle);
        }
    }

    fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(handle)
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<TimerHandle> {
        let mut due: Vec<(Duration, TimerHandle)> = Vec::new();

        for (handle, timer) in &mut self.timers {
            timer.accumulated += elapsed;
            let mut fire_at = timer.interval;
            while timer.accumulated >= timer.interval {
                timer.accumulated -= timer.interval;
                due.push((fire_at, handle));
                fire_at += timer.interval;
            }
        }

        // Interleave timers by the moment each firing would have happened
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, handle)| handle).collect()
    }
}
