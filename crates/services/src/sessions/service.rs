use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use quiz_core::model::{
    AnswerOutcome, Progress, QuestionDraft, QuestionSet, QuizState, QuizSummary, ShuffledQuestion,
};
use quiz_core::{Clock, Elapsed, QuizSettings};
use sources::SourceError;

use super::report::{build_summary, progress};
use super::shuffler::shuffle;
use super::view::{QuizEvent, QuizSnapshot};
use crate::error::{GuardViolation, SessionError};
use crate::timers::{Countdown, CountdownEvent, Stopwatch, TimerHandle, TimerKind};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt: the state machine plus the three timers it owns.
///
/// Every method is a single transition. Signals that do not apply in the
/// current state are dropped and produce no events, so the caller never has to
/// pre-check state before forwarding input or timer fires.
pub struct QuizSession {
    settings: QuizSettings,
    clock: Clock,
    rng: StdRng,
    state: QuizState,
    questions: Option<QuestionSet>,
    current_index: Option<usize>,
    current: Option<ShuffledQuestion>,
    selected: Option<usize>,
    revealed: bool,
    score: usize,
    outcomes: Vec<AnswerOutcome>,
    countdown: Countdown,
    stopwatch: Stopwatch,
    advance: Countdown,
    started_at: Option<DateTime<Utc>>,
    summary: Option<QuizSummary>,
    failure: Option<SessionError>,
}

impl QuizSession {
    /// Create an idle session seeded from the thread-local RNG.
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_rng(settings, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an idle session with a fixed shuffle seed (deterministic tests).
    #[must_use]
    pub fn seeded(settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: QuizSettings, rng: StdRng) -> Self {
        Self {
            settings,
            clock: Clock::default(),
            rng,
            state: QuizState::Idle,
            questions: None,
            current_index: None,
            current: None,
            selected: None,
            revealed: false,
            score: 0,
            outcomes: Vec::new(),
            countdown: Countdown::new(TimerKind::Question, settings.question_time_limit()),
            stopwatch: Stopwatch::new(),
            advance: Countdown::new(TimerKind::Advance, settings.advance_delay()),
            started_at: None,
            summary: None,
            failure: None,
        }
    }

    /// Override the clock used for summary timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// 0-based index of the question on screen; `None` before a set is loaded.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn current_correct_index(&self) -> Option<usize> {
        self.current.as_ref().map(ShuffledQuestion::correct_index)
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Index of the correct option once it has been revealed by a lock.
    #[must_use]
    pub fn revealed_correct_index(&self) -> Option<usize> {
        if self.revealed {
            self.current_correct_index()
        } else {
            None
        }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn countdown_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.stopwatch.elapsed()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress(self)
    }

    /// Handles of every running timer, in the order `tick` fires them.
    #[must_use]
    pub fn live_timers(&self) -> Vec<TimerHandle> {
        [
            self.stopwatch.handle(),
            self.advance.handle(),
            self.countdown.handle(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            state: self.state,
            question: self.current.clone(),
            selected: self.selected,
            revealed_correct: self.revealed_correct_index(),
            progress: self.progress(),
            score: self.score,
            countdown_remaining: self.countdown.remaining(),
            elapsed: self.elapsed(),
            summary: self.summary.clone(),
            failure: self.failure.clone(),
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Idle → Loading. The caller is expected to fetch questions and pass the
    /// result to `load`.
    pub fn start(&mut self) -> Vec<QuizEvent> {
        if self.state != QuizState::Idle {
            return GuardViolation::WrongState {
                signal: "start",
                state: self.state,
            }
            .absorb();
        }
        self.state = QuizState::Loading;
        vec![QuizEvent::StateChanged(QuizState::Loading)]
    }

    /// Loading → Active on a usable question set, Loading → Error otherwise.
    pub fn load(
        &mut self,
        fetched: Result<Vec<QuestionDraft>, SourceError>,
    ) -> Vec<QuizEvent> {
        if self.state != QuizState::Loading {
            return GuardViolation::WrongState {
                signal: "load",
                state: self.state,
            }
            .absorb();
        }

        let questions = match fetched
            .map_err(SessionError::from)
            .and_then(|drafts| QuestionSet::from_drafts(drafts).map_err(SessionError::from))
        {
            Ok(questions) => questions,
            Err(error) => return self.fail(error),
        };

        tracing::info!(questions = questions.len(), "quiz loaded");
        self.questions = Some(questions);
        self.score = 0;
        self.outcomes.clear();
        self.summary = None;
        self.failure = None;
        self.started_at = Some(self.clock.now());
        self.stopwatch.start();

        let mut events = vec![QuizEvent::StateChanged(QuizState::Active)];
        events.extend(self.show_question(0));
        events
    }

    /// Record a selection for the question on screen (Active → Locked).
    ///
    /// Ignored unless the countdown is still running and nothing was selected
    /// yet, so a selection racing a timeout cannot lock the question twice.
    pub fn select(&mut self, option: usize) -> Vec<QuizEvent> {
        if self.state != QuizState::Active {
            return GuardViolation::WrongState {
                signal: "select",
                state: self.state,
            }
            .absorb();
        }
        if self.selected.is_some() || !self.countdown.is_running() {
            return GuardViolation::AlreadySelected.absorb();
        }
        let len = self.current.as_ref().map_or(0, |q| q.options().len());
        if option >= len {
            return GuardViolation::OptionOutOfRange { index: option, len }.absorb();
        }

        self.selected = Some(option);
        self.countdown.stop();
        self.lock()
    }

    /// Deliver one elapsed time unit to the timer identified by `handle`.
    pub fn fire(&mut self, handle: TimerHandle) -> Vec<QuizEvent> {
        match handle.kind() {
            TimerKind::Elapsed => match self.stopwatch.fire(handle) {
                Some(elapsed) => vec![QuizEvent::ElapsedTick(elapsed)],
                None => GuardViolation::StaleTimer(handle).absorb(),
            },
            TimerKind::Question => {
                if self.state != QuizState::Active {
                    return GuardViolation::WrongState {
                        signal: "countdown",
                        state: self.state,
                    }
                    .absorb();
                }
                match self.countdown.fire(handle) {
                    Some(CountdownEvent::Tick { remaining }) => {
                        vec![QuizEvent::CountdownTick { remaining }]
                    }
                    Some(CountdownEvent::Expired) => {
                        let mut events = vec![QuizEvent::CountdownExpired];
                        events.extend(self.lock());
                        events
                    }
                    None => GuardViolation::StaleTimer(handle).absorb(),
                }
            }
            TimerKind::Advance => {
                if self.state != QuizState::Locked {
                    return GuardViolation::WrongState {
                        signal: "advance",
                        state: self.state,
                    }
                    .absorb();
                }
                match self.advance.fire(handle) {
                    Some(CountdownEvent::Tick { .. }) => Vec::new(),
                    Some(CountdownEvent::Expired) => self.advance_question(),
                    None => GuardViolation::StaleTimer(handle).absorb(),
                }
            }
        }
    }

    /// Advance every running timer by one unit.
    ///
    /// Timers started during this call (the next question's countdown, a new
    /// advance delay) first tick on the following call.
    pub fn tick(&mut self) -> Vec<QuizEvent> {
        let mut events = Vec::new();
        for handle in self.live_timers() {
            events.extend(self.fire(handle));
        }
        events
    }

    /// Finished/Error → Idle, stopping every timer and clearing the attempt.
    pub fn restart(&mut self) -> Vec<QuizEvent> {
        if !self.state.is_terminal() {
            return GuardViolation::WrongState {
                signal: "restart",
                state: self.state,
            }
            .absorb();
        }

        self.countdown.reset();
        self.advance.reset();
        self.stopwatch.reset();
        self.state = QuizState::Idle;
        self.questions = None;
        self.current_index = None;
        self.current = None;
        self.selected = None;
        self.revealed = false;
        self.score = 0;
        self.outcomes.clear();
        self.started_at = None;
        self.summary = None;
        self.failure = None;

        tracing::info!("quiz reset");
        vec![QuizEvent::Reset, QuizEvent::StateChanged(QuizState::Idle)]
    }

    //
    // ─── INTERNAL STEPS ────────────────────────────────────────────────────────
    //

    fn fail(&mut self, error: SessionError) -> Vec<QuizEvent> {
        tracing::warn!(%error, "quiz failed to load");
        self.stop_timers();
        self.state = QuizState::Error;
        self.failure = Some(error.clone());
        vec![
            QuizEvent::StateChanged(QuizState::Error),
            QuizEvent::Failed(error),
        ]
    }

    /// Shuffle question `index`, clear the selection and restart the countdown.
    fn show_question(&mut self, index: usize) -> Vec<QuizEvent> {
        let total = self.total_questions();
        let Some(question) = self.questions.as_ref().and_then(|set| set.get(index)) else {
            return Vec::new();
        };

        self.current = Some(shuffle(question, &mut self.rng));
        self.current_index = Some(index);
        self.selected = None;
        self.revealed = false;
        self.advance.stop();
        self.countdown.start(self.settings.question_time_limit());
        self.state = QuizState::Active;

        vec![QuizEvent::QuestionShown { index, total }]
    }

    /// Enter Locked: score, reveal, and schedule the single delayed advance.
    fn lock(&mut self) -> Vec<QuizEvent> {
        let (Some(index), Some(correct_index)) = (self.current_index, self.current_correct_index())
        else {
            return Vec::new();
        };

        self.countdown.stop();
        let outcome = AnswerOutcome::judge(self.selected, correct_index);
        if outcome.is_correct() {
            self.score += 1;
        }
        self.outcomes.push(outcome);
        self.revealed = true;
        self.state = QuizState::Locked;
        self.advance.start(self.settings.advance_delay());

        tracing::debug!(index, ?outcome, score = self.score, "question locked");
        vec![
            QuizEvent::StateChanged(QuizState::Locked),
            QuizEvent::AnswerLocked {
                index,
                selected: self.selected,
                correct_index,
                outcome,
            },
        ]
    }

    /// Delayed advance fired: next question, or finish after the last one.
    fn advance_question(&mut self) -> Vec<QuizEvent> {
        let next = self.current_index.map_or(0, |i| i + 1);
        if next < self.total_questions() {
            let mut events = vec![QuizEvent::StateChanged(QuizState::Active)];
            events.extend(self.show_question(next));
            return events;
        }
        self.finish()
    }

    /// Enter Finished with its summary, or leave the session untouched.
    fn finish(&mut self) -> Vec<QuizEvent> {
        let summary = match build_summary(self) {
            Ok(summary) => summary,
            Err(error) => {
                tracing::error!(%error, "could not summarize finished quiz");
                return Vec::new();
            }
        };

        self.stop_timers();
        self.state = QuizState::Finished;
        self.summary = Some(summary.clone());
        tracing::info!(
            score = summary.score(),
            total = summary.total(),
            percent = summary.percent(),
            elapsed = %summary.elapsed(),
            "quiz finished"
        );
        vec![
            QuizEvent::StateChanged(QuizState::Finished),
            QuizEvent::Finished(summary),
        ]
    }

    fn stop_timers(&mut self) {
        self.countdown.stop();
        self.advance.stop();
        self.stopwatch.stop();
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("questions_len", &self.total_questions())
            .field("current_index", &self.current_index)
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("countdown", &self.countdown.remaining())
            .field("elapsed", &self.stopwatch.elapsed())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
