//! The [`PeopleAlsoAsk`] client.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::answer::{extract_answer, AnswerRecord};
use crate::config::PaaConfig;
use crate::dom::Document;
use crate::errors::{validate_question, Result};
use crate::explorer::{AnswerExplorer, RelatedQuestionExplorer};
use crate::fetch::{FetchResult, LoggingTraversalObserver, SearchFetcher, TraversalObserver};
use crate::related::extract_related_questions;

/// Answers questions from search result pages.
///
/// # Example
///
/// ```rust,no_run
/// use people_also_ask::prelude::*;
///
/// # async fn example() -> people_also_ask::errors::Result<()> {
/// let paa = PeopleAlsoAsk::with_http(PaaConfig::default())?;
/// let answer = paa.get_answer("why is the sky blue", None).await?;
/// println!("{}", answer.response);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PeopleAlsoAsk {
    fetcher: Arc<dyn SearchFetcher>,
    observer: Arc<dyn TraversalObserver>,
    config: PaaConfig,
}

impl PeopleAlsoAsk {
    /// Creates a client over any fetch collaborator.
    pub fn new(fetcher: Arc<dyn SearchFetcher>, config: PaaConfig) -> Self {
        Self {
            fetcher,
            observer: Arc::new(LoggingTraversalObserver),
            config,
        }
    }

    /// Creates a client backed by [`HttpSearchFetcher`](crate::fetch::HttpSearchFetcher).
    #[cfg(feature = "http")]
    pub fn with_http(config: PaaConfig) -> Result<Self> {
        let fetcher = crate::fetch::HttpSearchFetcher::new(config.fetch.clone())?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    /// Sets the traversal observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TraversalObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &PaaConfig {
        &self.config
    }

    /// Fetches `question` and extracts its featured answer.
    pub async fn get_answer(&self, question: &str, domain: Option<&str>) -> Result<AnswerRecord> {
        validate_question(question)?;
        let request_id = Uuid::new_v4().to_string();
        let page = self.fetch_page(question, domain, &request_id).await?;

        let record = extract_answer(question, &Document::parse(&page.text), &self.config.extraction)?;
        self.observer.on_answer(
            question,
            &request_id,
            record.shape,
            record.related_questions.len(),
        );
        Ok(record)
    }

    /// Returns the answer text for `question`, or an empty string.
    ///
    /// With `depth`, a question without an answer falls back once to the
    /// first of its related questions.
    pub async fn get_simple_answer(
        &self,
        question: &str,
        depth: bool,
        domain: Option<&str>,
    ) -> Result<String> {
        let record = self.get_answer(question, domain).await?;
        if record.has_answer {
            return Ok(record.response);
        }

        let next = record
            .related_questions
            .iter()
            .find(|q| validate_question(q).is_ok());
        match next {
            Some(next) if depth => {
                debug!(question, next = next.as_str(), "no answer, trying first related question");
                let fallback = self.get_answer(next, domain).await?;
                Ok(if fallback.has_answer {
                    fallback.response
                } else {
                    String::new()
                })
            }
            _ => Ok(String::new()),
        }
    }

    /// Returns related questions of `question`.
    ///
    /// Without a cap only the fetched page is read; its questions come back
    /// deduplicated in page order. With a cap the related-question graph is
    /// explored until `max_questions` distinct questions are found.
    pub async fn get_related_questions(
        &self,
        question: &str,
        max_questions: Option<usize>,
        domain: Option<&str>,
    ) -> Result<Vec<String>> {
        validate_question(question)?;

        if let Some(max) = max_questions {
            return RelatedQuestionExplorer::new(
                self.fetcher.clone(),
                question,
                self.domain(domain),
                Some(max),
            )
            .with_observer(self.observer.clone())
            .collect()
            .await;
        }

        let request_id = Uuid::new_v4().to_string();
        let page = self.fetch_page(question, domain, &request_id).await?;
        let mut seen = HashSet::new();
        Ok(extract_related_questions(&Document::parse(&page.text))
            .into_iter()
            .filter(|q| seen.insert(q.clone()))
            .collect())
    }

    /// Lazily explores answers starting at `question`.
    ///
    /// Nothing is fetched until the explorer is advanced.
    pub fn generate_answers(&self, question: &str, domain: Option<&str>) -> AnswerExplorer {
        AnswerExplorer::new(
            self.fetcher.clone(),
            &self.config,
            question,
            self.domain(domain),
            None,
        )
        .with_observer(self.observer.clone())
    }

    fn domain<'a>(&'a self, domain: Option<&'a str>) -> &'a str {
        domain.unwrap_or(&self.config.default_domain)
    }

    async fn fetch_page(
        &self,
        question: &str,
        domain: Option<&str>,
        request_id: &str,
    ) -> Result<FetchResult> {
        self.observer.on_fetch_start(question, request_id);
        match self.fetcher.fetch(question, self.domain(domain)).await {
            Ok(page) => {
                self.observer
                    .on_fetch_complete(question, request_id, page.duration_ms, page.status_code);
                Ok(page)
            }
            Err(e) => {
                self.observer.on_fetch_error(question, request_id, &e.to_string());
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for PeopleAlsoAsk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeopleAlsoAsk")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Maps each answered question to its response text.
///
/// Records without an answer are left out. A question seen twice keeps its
/// first response.
pub fn collect_answers<I>(records: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = AnswerRecord>,
{
    let mut answers = BTreeMap::new();
    for record in records.into_iter().filter(|r| r.has_answer) {
        answers.entry(record.question).or_insert(record.response);
    }
    answers
}
