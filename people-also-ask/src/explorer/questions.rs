//! Related question discovery without answer extraction.

use futures::Stream;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::state::ExplorationState;
use crate::dom::Document;
use crate::errors::{validate_question, Result};
use crate::fetch::{NoOpTraversalObserver, SearchFetcher, TraversalObserver};
use crate::related::extract_related_questions;

/// Yields distinct related questions reachable from an initial question.
///
/// Discovered questions are emitted before anything else is fetched. An
/// emitted question is fetched only once the frontier runs dry, so reaching
/// the cap never triggers another fetch. The initial question is never
/// emitted.
pub struct RelatedQuestionExplorer {
    fetcher: Arc<dyn SearchFetcher>,
    observer: Arc<dyn TraversalObserver>,
    domain: String,
    initial: Option<String>,
    to_expand: VecDeque<String>,
    state: ExplorationState,
    done: bool,
}

impl RelatedQuestionExplorer {
    /// Creates an explorer starting at `initial`.
    pub fn new(
        fetcher: Arc<dyn SearchFetcher>,
        initial: impl Into<String>,
        domain: impl Into<String>,
        max_questions: Option<usize>,
    ) -> Self {
        Self {
            fetcher,
            observer: Arc::new(NoOpTraversalObserver),
            domain: domain.into(),
            initial: Some(initial.into()),
            to_expand: VecDeque::new(),
            state: ExplorationState::new(max_questions),
            done: false,
        }
    }

    /// Sets the traversal observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TraversalObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Traversal state so far.
    #[must_use]
    pub fn state(&self) -> &ExplorationState {
        &self.state
    }

    /// Advances to the next question.
    pub async fn next_question(&mut self) -> Option<Result<String>> {
        if self.done {
            return None;
        }

        if let Some(initial) = self.initial.take() {
            if let Err(e) = validate_question(&initial) {
                self.done = true;
                return Some(Err(e));
            }
            self.state.visit(&initial);
            self.to_expand.push_back(initial);
        }

        loop {
            if self.state.is_capped() {
                debug!(max_questions = ?self.state.max_questions(), "question cap reached");
                self.done = true;
                return None;
            }

            if let Some(question) = self.state.next_unvisited() {
                self.state.visit(&question);
                self.state.record_emitted(question.as_str());
                self.to_expand.push_back(question.clone());
                return Some(Ok(question));
            }

            let Some(question) = self.to_expand.pop_front() else {
                self.done = true;
                return None;
            };
            if let Err(e) = self.expand(&question).await {
                self.done = true;
                return Some(Err(e));
            }
        }
    }

    /// Collects every remaining question, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<String>> {
        let mut questions = Vec::new();
        while let Some(question) = self.next_question().await {
            questions.push(question?);
        }
        Ok(questions)
    }

    /// Converts the explorer into a stream of questions.
    pub fn into_stream(self) -> impl Stream<Item = Result<String>> {
        futures::stream::unfold(self, |mut explorer| async move {
            explorer.next_question().await.map(|item| (item, explorer))
        })
    }

    async fn expand(&mut self, question: &str) -> Result<()> {
        let request_id = Uuid::new_v4().to_string();
        self.observer.on_fetch_start(question, &request_id);

        let page = match self.fetcher.fetch(question, &self.domain).await {
            Ok(page) => page,
            Err(e) => {
                self.observer.on_fetch_error(question, &request_id, &e.to_string());
                return Err(e);
            }
        };
        self.observer
            .on_fetch_complete(question, &request_id, page.duration_ms, page.status_code);

        let related = extract_related_questions(&Document::parse(&page.text));
        let added = self.state.enqueue_all(related);
        debug!(question, added, "related questions expanded");
        Ok(())
    }
}

impl std::fmt::Debug for RelatedQuestionExplorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelatedQuestionExplorer")
            .field("domain", &self.domain)
            .field("to_expand", &self.to_expand)
            .field("state", &self.state)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
