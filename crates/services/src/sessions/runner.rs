//! Async driver for a quiz session.
//!
//! A single task owns the session. Commands, fetch results and timer deadlines
//! all arrive through one `select!`, so transitions never interleave.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use quiz_core::model::QuizState;

use super::service::QuizSession;
use super::view::{QuizEvent, QuizSnapshot};
use super::workflow::QuizLoopService;
use crate::error::RunnerClosed;
use crate::timers::TimerHandle;

const COMMAND_BUFFER: usize = 16;

/// Input accepted by a running quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Start,
    Select(usize),
    Restart,
    Shutdown,
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Presentation-side end of a spawned runner.
///
/// Events queue without bound until read. A caller that only renders
/// snapshots should call `ignore_events` so the queue does not grow.
#[derive(Debug)]
pub struct QuizHandle {
    commands: mpsc::Sender<QuizCommand>,
    snapshots: watch::Receiver<QuizSnapshot>,
    events: mpsc::UnboundedReceiver<QuizEvent>,
}

impl QuizHandle {
    /// # Errors
    ///
    /// Returns `RunnerClosed` if the runner task has exited.
    pub async fn send(&self, command: QuizCommand) -> Result<(), RunnerClosed> {
        self.commands.send(command).await.map_err(|_| RunnerClosed)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until the session reaches `state`.
    ///
    /// # Errors
    ///
    /// Returns `RunnerClosed` if the runner exits first.
    pub async fn wait_for_state(&mut self, state: QuizState) -> Result<QuizSnapshot, RunnerClosed> {
        self.snapshots
            .wait_for(|snapshot| snapshot.state == state)
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| RunnerClosed)
    }

    /// Next event, waiting if none is queued. `None` once the runner is gone.
    pub async fn next_event(&mut self) -> Option<QuizEvent> {
        self.events.recv().await
    }

    /// Stop receiving events and discard those already queued.
    ///
    /// Snapshots keep updating; `next_event` returns `None` from here on.
    pub fn ignore_events(&mut self) {
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    /// Every event queued so far, without waiting.
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

//
// ─── SCHEDULE ──────────────────────────────────────────────────────────────────
//

/// Next deadline for each running timer, keyed by handle.
#[derive(Debug, Default)]
struct Schedule {
    entries: Vec<(TimerHandle, Instant)>,
}

impl Schedule {
    /// Drop deadlines of timers that stopped; give new runs a full unit.
    fn sync(&mut self, live: &[TimerHandle], now: Instant, unit: Duration) {
        self.entries.retain(|(handle, _)| live.contains(handle));
        for handle in live {
            if !self.entries.iter().any(|(h, _)| h == handle) {
                self.entries.push((*handle, now + unit));
            }
        }
    }

    /// Earliest deadline; ties resolve in the same order as `QuizSession::tick`.
    fn next(&self) -> Option<(TimerHandle, Instant)> {
        self.entries
            .iter()
            .copied()
            .min_by_key(|(handle, at)| (*at, handle.kind()))
    }

    fn reschedule(&mut self, handle: TimerHandle, unit: Duration) {
        if let Some(entry) = self.entries.iter_mut().find(|(h, _)| *h == handle) {
            entry.1 += unit;
        }
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Owns a session and drives it from commands and wall-clock time.
#[derive(Debug)]
pub struct QuizRunner {
    session: QuizSession,
    loader: QuizLoopService,
}

impl QuizRunner {
    #[must_use]
    pub fn new(session: QuizSession, loader: QuizLoopService) -> Self {
        Self { session, loader }
    }

    /// Spawn the runner on the current tokio runtime.
    ///
    /// The join handle yields the session back after `Shutdown`, or once every
    /// `QuizHandle` has been dropped.
    #[must_use]
    pub fn spawn(self) -> (QuizHandle, JoinHandle<QuizSession>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(self.session.snapshot());
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(self.run(command_rx, snapshot_tx, event_tx));
        let handle = QuizHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            events: event_rx,
        };
        (handle, task)
    }

    /// Serve commands until `Shutdown` or until the command channel closes.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<QuizCommand>,
        snapshots: watch::Sender<QuizSnapshot>,
        events: mpsc::UnboundedSender<QuizEvent>,
    ) -> QuizSession {
        let unit = self.session.settings().unit();
        let (fetch_tx, mut fetch_rx) = mpsc::channel(1);
        let mut schedule = Schedule::default();

        loop {
            schedule.sync(&self.session.live_timers(), Instant::now(), unit);
            let next = schedule.next();
            let deadline = next.map_or_else(|| Instant::now() + unit, |(_, at)| at);

            let emitted = tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(QuizCommand::Start) => {
                        let emitted = self.session.start();
                        if self.session.state() == QuizState::Loading {
                            let fetch = self.loader.fetch();
                            let tx = fetch_tx.clone();
                            tokio::spawn(async move {
                                // The runner may be gone by the time the source answers.
                                let _ = tx.send(fetch.await).await;
                            });
                        }
                        emitted
                    }
                    Some(QuizCommand::Select(option)) => self.session.select(option),
                    Some(QuizCommand::Restart) => self.session.restart(),
                    Some(QuizCommand::Shutdown) | None => break,
                },

                Some(fetched) = fetch_rx.recv() => self.session.load(fetched),

                () = sleep_until(deadline), if next.is_some() => match next {
                    Some((handle, _)) => {
                        schedule.reschedule(handle, unit);
                        self.session.fire(handle)
                    }
                    None => Vec::new(),
                },
            };

            if emitted.is_empty() {
                continue;
            }
            if !events.is_closed() {
                for event in emitted {
                    if events.send(event).is_err() {
                        tracing::trace!("event receiver dropped");
                        break;
                    }
                }
            }
            snapshots.send_replace(self.session.snapshot());
        }

        tracing::debug!(state = %self.session.state(), "quiz runner stopped");
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::{Countdown, Stopwatch, TimerKind};

    #[tokio::test(start_paused = true)]
    async fn schedule_orders_ties_like_tick() {
        let unit = Duration::from_secs(1);
        let now = Instant::now();
        let mut countdown = Countdown::new(TimerKind::Question, 30);
        let mut stopwatch = Stopwatch::new();
        let question = countdown.start(30);
        let elapsed = stopwatch.start();

        let mut schedule = Schedule::default();
        schedule.sync(&[question, elapsed], now, unit);
        assert_eq!(schedule.next(), Some((elapsed, now + unit)));

        schedule.reschedule(elapsed, unit);
        assert_eq!(schedule.next(), Some((question, now + unit)));
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_forgets_stopped_timers_and_restarts_new_runs() {
        let unit = Duration::from_secs(1);
        let now = Instant::now();
        let mut countdown = Countdown::new(TimerKind::Question, 30);
        let first = countdown.start(30);

        let mut schedule = Schedule::default();
        schedule.sync(&[first], now, unit);
        schedule.reschedule(first, unit);

        let second = countdown.start(30);
        let later = now + Duration::from_millis(1_500);
        schedule.sync(&[second], later, unit);
        assert_eq!(schedule.entries, vec![(second, later + unit)]);

        schedule.sync(&[], later, unit);
        assert_eq!(schedule.next(), None);
    }
}
