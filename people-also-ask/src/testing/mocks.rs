//! In-memory fetch collaborators for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::fixtures::results_page;
use crate::errors::{PaaError, Result};
use crate::fetch::{FetchResult, SearchFetcher};

/// A fetcher serving fixed pages and recording every query.
///
/// Unknown queries fail with a 404 [`PaaError::Fetch`].
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Creates an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a question graph: every node answers "answer to <node>" and
    /// lists its children as related questions.
    #[must_use]
    pub fn graph(edges: &[(&str, &[&str])]) -> Self {
        edges.iter().fold(Self::new(), |fetcher, (question, related)| {
            let answer = format!("answer to {question}");
            fetcher.with_page(*question, results_page(Some(&answer), related))
        })
    }

    /// Serves `html` for `query`.
    #[must_use]
    pub fn with_page(mut self, query: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(query.into(), html.into());
        self
    }

    /// Makes `query` fail with a 503.
    #[must_use]
    pub fn with_failure(mut self, query: impl Into<String>) -> Self {
        self.failures.insert(query.into());
        self
    }

    /// Queries fetched so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of fetches so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of fetches of `query`.
    #[must_use]
    pub fn calls_for(&self, query: &str) -> usize {
        self.calls.lock().iter().filter(|q| *q == query).count()
    }
}

#[async_trait]
impl SearchFetcher for StaticFetcher {
    async fn fetch(&self, query: &str, domain: &str) -> Result<FetchResult> {
        self.calls.lock().push(query.to_string());
        let url = format!("https://www.google.{domain}/search?q={query}");

        if self.failures.contains(query) {
            return Err(PaaError::fetch(query, url, "service unavailable", Some(503)));
        }
        match self.pages.get(query) {
            Some(html) => Ok(FetchResult::ok(html.clone(), url)),
            None => Err(PaaError::fetch(query, url, "no such page", Some(404))),
        }
    }
}
