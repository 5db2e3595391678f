//! Tick-driven timers owned by a quiz session.
//!
//! Timers never sleep on their own. Whoever drives the session (a test, or the
//! async runner) delivers one `fire` per elapsed time unit, addressed with the
//! `TimerHandle` returned by `start`. A handle from a stopped or restarted timer
//! no longer matches, so late deliveries are dropped instead of ticking twice.

mod countdown;
mod stopwatch;

pub use countdown::{Countdown, CountdownEvent};
pub use stopwatch::Stopwatch;

/// Which timer a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Session-wide elapsed time.
    Elapsed,
    /// One-shot delay between locking a question and moving on.
    Advance,
    /// Per-question time limit.
    Question,
}

/// Identifies one run of one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    kind: TimerKind,
    generation: u64,
}

impl TimerHandle {
    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

/// Liveness bookkeeping shared by every timer kind.
#[derive(Debug, Clone)]
struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    live: bool,
}

impl TimerSlot {
    fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            live: false,
        }
    }

    /// Issue a fresh handle, retiring whatever ran before.
    fn arm(&mut self) -> TimerHandle {
        if self.live {
            tracing::debug!(kind = ?self.kind, "restarting a running timer");
        }
        self.generation = self.generation.wrapping_add(1);
        self.live = true;
        TimerHandle {
            kind: self.kind,
            generation: self.generation,
        }
    }

    /// Returns whether the timer was running.
    fn disarm(&mut self) -> bool {
        std::mem::replace(&mut self.live, false)
    }

    fn accepts(&self, handle: TimerHandle) -> bool {
        self.live && handle.kind == self.kind && handle.generation == self.generation
    }

    fn handle(&self) -> Option<TimerHandle> {
        self.live.then_some(TimerHandle {
            kind: self.kind,
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_invalidates_previous_handle() {
        let mut slot = TimerSlot::new(TimerKind::Question);
        let first = slot.arm();
        let second = slot.arm();

        assert!(!slot.accepts(first));
        assert!(slot.accepts(second));
        assert_eq!(slot.handle(), Some(second));
    }

    #[test]
    fn disarm_is_idempotent() {
        let mut slot = TimerSlot::new(TimerKind::Elapsed);
        let handle = slot.arm();
        assert!(slot.disarm());
        assert!(!slot.disarm());
        assert!(!slot.accepts(handle));
        assert_eq!(slot.handle(), None);
    }

    #[test]
    fn handles_of_other_kinds_are_rejected() {
        let mut question = TimerSlot::new(TimerKind::Question);
        let mut advance = TimerSlot::new(TimerKind::Advance);
        let q = question.arm();
        let a = advance.arm();
        assert!(!question.accepts(a));
        assert!(!advance.accepts(q));
    }
}
