use quiz_core::Elapsed;

use super::{TimerHandle, TimerKind, TimerSlot};

/// Counts units up from zero until stopped.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    slot: TimerSlot,
    elapsed: Elapsed,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: TimerSlot::new(TimerKind::Elapsed),
            elapsed: Elapsed::ZERO,
        }
    }

    /// Start counting from zero, replacing any run in progress.
    pub fn start(&mut self) -> TimerHandle {
        self.elapsed = Elapsed::ZERO;
        self.slot.arm()
    }

    /// Stop counting; the elapsed value is kept. Safe to call twice.
    pub fn stop(&mut self) -> bool {
        self.slot.disarm()
    }

    pub fn reset(&mut self) {
        self.slot.disarm();
        self.elapsed = Elapsed::ZERO;
    }

    /// Count one unit for `handle`; `None` for a stale handle.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<Elapsed> {
        if !self.slot.accepts(handle) {
            return None;
        }
        self.elapsed = self.elapsed.incremented();
        Some(self.elapsed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
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
