//! Answer traversal: one fetched page per advance, answers emitted lazily.

use futures::Stream;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::state::ExplorationState;
use crate::answer::{extract_answer, AnswerRecord};
use crate::config::{ExtractionConfig, ExtractionErrorPolicy, PaaConfig};
use crate::dom::Document;
use crate::errors::{validate_question, Result};
use crate::fetch::{NoOpTraversalObserver, SearchFetcher, TraversalObserver};
use crate::related::extract_related_questions;

/// Walks the related-question graph and yields every answer found.
///
/// The initial question is fetched on the first advance; each later advance
/// fetches one unvisited question from the frontier. Fetch errors end the
/// sequence. Extraction errors end it under [`ExtractionErrorPolicy::Abort`]
/// and are logged and skipped under [`ExtractionErrorPolicy::Skip`].
pub struct AnswerExplorer {
    fetcher: Arc<dyn SearchFetcher>,
    observer: Arc<dyn TraversalObserver>,
    extraction: ExtractionConfig,
    policy: ExtractionErrorPolicy,
    domain: String,
    initial: Option<String>,
    state: ExplorationState,
    done: bool,
}

impl AnswerExplorer {
    /// Creates an explorer starting at `initial`.
    ///
    /// `max_questions` overrides the cap from `config.explorer`.
    pub fn new(
        fetcher: Arc<dyn SearchFetcher>,
        config: &PaaConfig,
        initial: impl Into<String>,
        domain: impl Into<String>,
        max_questions: Option<usize>,
    ) -> Self {
        Self {
            fetcher,
            observer: Arc::new(NoOpTraversalObserver),
            extraction: config.extraction.clone(),
            policy: config.explorer.on_extraction_error,
            domain: domain.into(),
            initial: Some(initial.into()),
            state: ExplorationState::new(max_questions.or(config.explorer.max_questions)),
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

    /// Advances to the next answer.
    ///
    /// Returns `None` once the frontier is empty, the cap is reached or an
    /// error has been yielded.
    pub async fn next_answer(&mut self) -> Option<Result<AnswerRecord>> {
        if self.done {
            return None;
        }

        if let Some(initial) = self.initial.take() {
            if let Err(e) = validate_question(&initial) {
                self.done = true;
                return Some(Err(e));
            }
            if let Some(item) = self.step(initial).await {
                return Some(item);
            }
        }

        while !self.done {
            let Some(question) = self.state.next_unvisited() else {
                debug!(emitted = self.state.emitted(), "frontier exhausted");
                self.done = true;
                break;
            };
            if let Some(item) = self.step(question).await {
                return Some(item);
            }
        }
        None
    }

    /// Converts the explorer into a stream of answers.
    pub fn into_stream(self) -> impl Stream<Item = Result<AnswerRecord>> {
        futures::stream::unfold(self, |mut explorer| async move {
            explorer.next_answer().await.map(|item| (item, explorer))
        })
    }

    async fn step(&mut self, question: String) -> Option<Result<AnswerRecord>> {
        if self.state.is_capped() {
            debug!(max_questions = ?self.state.max_questions(), "question cap reached");
            self.done = true;
            return None;
        }
        self.state.visit(&question);

        match self.visit(&question).await {
            Ok(Some(record)) => {
                self.state.record_emitted(record.question.as_str());
                Some(Ok(record))
            }
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    async fn visit(&mut self, question: &str) -> Result<Option<AnswerRecord>> {
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

        let (answer, related) = read_page(question, &page.text, &self.extraction);
        self.state.enqueue_all(related);

        match answer {
            Ok(record) => {
                self.observer.on_answer(
                    question,
                    &request_id,
                    record.shape,
                    record.related_questions.len(),
                );
                Ok(record.has_answer.then_some(record))
            }
            Err(e) if !e.is_terminal() && self.policy == ExtractionErrorPolicy::Skip =>
            {
                warn!(question, %request_id, error = %e, "skipping unextractable answer");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for AnswerExplorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerExplorer")
            .field("domain", &self.domain)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Parses a page and returns its answer along with its related questions.
///
/// Related questions are returned even when extraction fails.
fn read_page(
    question: &str,
    html: &str,
    config: &ExtractionConfig,
) -> (Result<AnswerRecord>, Vec<String>) {
    let document = Document::parse(html);
    let answer = extract_answer(question, &document, config);
    let related = match &answer {
        Ok(record) => record.related_questions.clone(),
        Err(_) => extract_related_questions(&document),
    };
    (answer, related)
}
