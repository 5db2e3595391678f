use super::{TimerHandle, TimerKind, TimerSlot};

/// What a countdown did with one delivered time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { remaining: u32 },
    /// Reached zero. Emitted once; the countdown has already stopped itself.
    Expired,
}

/// Counts a fixed number of units down to zero.
#[derive(Debug, Clone)]
pub struct Countdown {
    slot: TimerSlot,
    duration: u32,
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(kind: TimerKind, duration: u32) -> Self {
        Self {
            slot: TimerSlot::new(kind),
            duration,
            remaining: duration,
        }
    }

    /// Start from the full duration. A run already in progress is replaced.
    pub fn start(&mut self, duration: u32) -> TimerHandle {
        self.duration = duration;
        self.remaining = duration;
        self.slot.arm()
    }

    /// Stop ticking. Safe to call on a stopped countdown.
    pub fn stop(&mut self) -> bool {
        self.slot.disarm()
    }

    /// Stop and restore the full duration.
    pub fn reset(&mut self) {
        self.slot.disarm();
        self.remaining = self.duration;
    }

    /// Consume one time unit for `handle`.
    ///
    /// Returns `None` when `handle` does not belong to the current run.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<CountdownEvent> {
        if !self.slot.accepts(handle) {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.slot.disarm();
            Some(CountdownEvent::Expired)
        } else {
            Some(CountdownEvent::Tick {
                remaining: self.remaining,
            })
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.slot.live
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.slot.handle()
    }
}
