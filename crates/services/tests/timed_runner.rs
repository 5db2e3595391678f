use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{QuestionDraft, QuizState};
use services::{
    QuizCommand, QuizEvent, QuizHandle, QuizLoopService, QuizRunner, QuizSession, QuizSettings,
};
use sources::{InMemoryQuestionSource, SourceError};

fn paris_quiz(questions: usize) -> InMemoryQuestionSource {
    InMemoryQuestionSource::new(
        (0..questions)
            .map(|_| QuestionDraft::new("What is the capital of France?", "Paris", ["Rome"]))
            .collect(),
    )
}

fn spawn(source: InMemoryQuestionSource) -> (QuizHandle, tokio::task::JoinHandle<QuizSession>) {
    let session = QuizSession::seeded(QuizSettings::default(), 21);
    let loader = QuizLoopService::new(Arc::new(source));
    QuizRunner::new(session, loader).spawn()
}

#[tokio::test(start_paused = true)]
async fn runner_scores_a_selection_made_before_expiry() {
    let (mut handle, task) = spawn(paris_quiz(1));
    handle.send(QuizCommand::Start).await.unwrap();

    let active = handle.wait_for_state(QuizState::Active).await.unwrap();
    let question = active.question.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    handle
        .send(QuizCommand::Select(question.correct_index()))
        .await
        .unwrap();

    let finished = handle.wait_for_state(QuizState::Finished).await.unwrap();
    let summary = finished.summary.unwrap();
    assert_eq!(summary.score(), 1);
    assert_eq!(summary.percent(), 100);
    assert!(summary.elapsed().units() >= 8);

    handle.send(QuizCommand::Shutdown).await.unwrap();
    let session = task.await.unwrap();
    assert!(session.live_timers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn runner_times_out_an_unanswered_question() {
    let (mut handle, _task) = spawn(paris_quiz(1));
    handle.send(QuizCommand::Start).await.unwrap();

    let finished = handle.wait_for_state(QuizState::Finished).await.unwrap();
    assert_eq!(finished.score, 0);
    assert_eq!(finished.selected, None);
    assert!(finished.revealed_correct.is_some());
    assert_eq!(finished.summary.as_ref().unwrap().percent(), 0);
    assert_eq!(finished.elapsed.units(), 33);

    let events = handle.drain_events();
    let expiries = events
        .iter()
        .filter(|e| matches!(e, QuizEvent::CountdownExpired))
        .count();
    assert_eq!(expiries, 1);
    let ticks: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            QuizEvent::CountdownTick { remaining } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, (1..30).rev().collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn selection_after_expiry_is_ignored_by_the_runner() {
    let (mut handle, _task) = spawn(paris_quiz(2));
    handle.send(QuizCommand::Start).await.unwrap();
    handle.wait_for_state(QuizState::Locked).await.unwrap();

    let locked = handle.snapshot();
    let correct = locked.revealed_correct.unwrap();
    handle.send(QuizCommand::Select(correct)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let after = handle.snapshot();
    assert_eq!(after.score, 0);
    assert_eq!(after.selected, None);
}

#[tokio::test(start_paused = true)]
async fn restart_stops_every_timer() {
    let (mut handle, _task) = spawn(paris_quiz(1));
    handle.send(QuizCommand::Start).await.unwrap();
    handle.wait_for_state(QuizState::Finished).await.unwrap();

    handle.send(QuizCommand::Restart).await.unwrap();
    let idle = handle.wait_for_state(QuizState::Idle).await.unwrap();
    assert_eq!(idle.score, 0);
    assert_eq!(idle.progress.current, 0);
    handle.drain_events();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(handle.drain_events().is_empty());
    assert_eq!(handle.snapshot().elapsed.units(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_is_published_with_its_cause() {
    let source = InMemoryQuestionSource::failing(SourceError::Unavailable("offline".into()));
    let (mut handle, _task) = spawn(source);
    handle.send(QuizCommand::Start).await.unwrap();

    let failed = handle.wait_for_state(QuizState::Error).await.unwrap();
    assert!(failed.failure.unwrap().is_source_failure());
    assert!(failed.question.is_none());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_runner() {
    let (handle, task) = spawn(paris_quiz(1));
    drop(handle);
    let session = task.await.unwrap();
    assert_eq!(session.state(), QuizState::Idle);
}

#[tokio::test(start_paused = true)]
async fn ignored_events_are_not_queued() {
    let (mut handle, _task) = spawn(paris_quiz(1));
    handle.ignore_events();
    handle.send(QuizCommand::Start).await.unwrap();

    let finished = handle.wait_for_state(QuizState::Finished).await.unwrap();
    assert!(finished.summary.is_some());
    assert!(handle.drain_events().is_empty());
    assert_eq!(handle.next_event().await, None);
}
