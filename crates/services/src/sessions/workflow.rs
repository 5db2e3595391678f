use std::future::Future;
use std::sync::Arc;

use quiz_core::model::{QuestionDraft, QuizState};
use sources::{QuestionQuery, QuestionSource, SourceError};

use super::service::QuizSession;
use super::view::QuizEvent;

/// Bridges the asynchronous question source into a session.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    query: QuestionQuery,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            query: QuestionQuery::default(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: QuestionQuery) -> Self {
        self.query = query;
        self
    }

    /// A detached fetch that can be spawned without borrowing the service.
    pub fn fetch(
        &self,
    ) -> impl Future<Output = Result<Vec<QuestionDraft>, SourceError>> + Send + use<> {
        let source = Arc::clone(&self.source);
        let query = self.query;
        async move { source.fetch(&query).await }
    }

    /// Start `session` and wait for its question set.
    ///
    /// Returns every event produced on the way (Loading, then Active or Error).
    /// A session that is not Idle is left untouched.
    pub async fn start(&self, session: &mut QuizSession) -> Vec<QuizEvent> {
        let mut events = session.start();
        if session.state() != QuizState::Loading {
            return events;
        }

        let fetched = self.fetch().await;
        events.extend(session.load(fetched));
        events
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
