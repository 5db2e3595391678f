use std::sync::Arc;

use quiz_core::model::{AnswerOutcome, QuestionDraft, QuizState};
use quiz_core::time::fixed_clock;
use services::{QuizEvent, QuizLoopService, QuizSession, QuizSettings, SessionError, summary};
use sources::{InMemoryQuestionSource, QuestionQuery, SourceError};

fn paris() -> QuestionDraft {
    QuestionDraft::new("What is the capital of France?", "Paris", ["Rome"])
}

fn new_session() -> QuizSession {
    QuizSession::seeded(QuizSettings::default(), 11).with_clock(fixed_clock())
}

fn advance(session: &mut QuizSession) {
    for _ in 0..session.settings().advance_delay() {
        session.tick();
    }
}

#[tokio::test]
async fn selecting_paris_finishes_with_full_marks() {
    let source = InMemoryQuestionSource::new(vec![paris()]);
    let loader = QuizLoopService::new(Arc::new(source.clone()));
    let mut session = new_session();

    let events = loader.start(&mut session).await;
    assert_eq!(
        events[..2],
        [
            QuizEvent::StateChanged(QuizState::Loading),
            QuizEvent::StateChanged(QuizState::Active),
        ]
    );

    let question = session.current_question().unwrap().clone();
    let paris_index = question.options().iter().position(|o| o == "Paris").unwrap();
    assert_eq!(question.correct_index(), paris_index);

    session.select(paris_index);
    advance(&mut session);

    assert_eq!(session.state(), QuizState::Finished);
    let summary = summary(&session).unwrap();
    assert_eq!(summary.score(), 1);
    assert_eq!(summary.percent(), 100);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn no_selection_times_out_to_zero() {
    let loader = QuizLoopService::new(Arc::new(InMemoryQuestionSource::new(vec![paris()])));
    let mut session = new_session();
    loader.start(&mut session).await;

    for _ in 0..30 {
        session.tick();
    }
    assert_eq!(session.state(), QuizState::Locked);
    assert_eq!(session.selected_index(), None);
    assert!(session.revealed_correct_index().is_some());

    advance(&mut session);
    assert_eq!(session.state(), QuizState::Finished);
    let summary = summary(&session).unwrap();
    assert_eq!(summary.score(), 0);
    assert_eq!(summary.percent(), 0);
    assert_eq!(summary.timed_out(), 1);
    assert_eq!(session.outcomes(), &[AnswerOutcome::TimedOut]);
}

#[tokio::test]
async fn unreachable_source_lands_in_error_and_restart_recovers() {
    let source = InMemoryQuestionSource::failing(SourceError::Unavailable("dns".into()));
    let loader = QuizLoopService::new(Arc::new(source.clone()));
    let mut session = new_session();

    let events = loader.start(&mut session).await;
    assert_eq!(session.state(), QuizState::Error);
    assert!(events.contains(&QuizEvent::Failed(SessionError::Source(
        SourceError::Unavailable("dns".into())
    ))));

    session.restart();
    source.fail_with(None);
    source.set_questions(vec![paris(), paris()]);
    loader.start(&mut session).await;
    assert_eq!(session.state(), QuizState::Active);
    assert_eq!(session.progress().total, 2);
}

#[tokio::test]
async fn query_amount_limits_the_set() {
    let drafts = (0..10)
        .map(|i| QuestionDraft::new(format!("Q{i}"), "yes", ["no"]))
        .collect();
    let loader = QuizLoopService::new(Arc::new(InMemoryQuestionSource::new(drafts)))
        .with_query(QuestionQuery::new(3));
    let mut session = new_session();
    loader.start(&mut session).await;

    assert_eq!(session.total_questions(), 3);
}

#[tokio::test]
async fn mixed_answers_score_only_correct_ones() {
    let drafts = vec![paris(), paris(), paris()];
    let loader = QuizLoopService::new(Arc::new(InMemoryQuestionSource::new(drafts)));
    let mut session = new_session();
    loader.start(&mut session).await;

    // correct, wrong, timeout
    let correct = session.current_correct_index().unwrap();
    session.select(correct);
    advance(&mut session);

    let correct = session.current_correct_index().unwrap();
    session.select(1 - correct);
    advance(&mut session);

    for _ in 0..30 {
        session.tick();
    }
    advance(&mut session);

    let summary = summary(&session).unwrap();
    assert_eq!(summary.score(), 1);
    assert_eq!(summary.percent(), 33);
    assert_eq!(summary.timed_out(), 1);
    assert_eq!(
        session.outcomes(),
        &[
            AnswerOutcome::Correct,
            AnswerOutcome::Incorrect,
            AnswerOutcome::TimedOut
        ]
    );
}
