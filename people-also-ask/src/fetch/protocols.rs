//! Protocol traits for the fetch collaborator and traversal observers.
//!
//! Retries, proxies and rate limiting are the business of the
//! [`SearchFetcher`] implementation; the explorers only ever issue one
//! fetch per visited question.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::answer::Shape;
use crate::errors::Result;

/// Result of a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl FetchResult {
    /// A successful result carrying `html`.
    #[must_use]
    pub fn ok(html: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            text: html.into(),
            final_url: final_url.into(),
            duration_ms: 0.0,
        }
    }

    /// Whether the fetch was successful (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Protocol for fetching a results page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchFetcher: Send + Sync {
    /// Fetches the results page of `query` on the search `domain` (e.g. `com`).
    async fn fetch(&self, query: &str, domain: &str) -> Result<FetchResult>;
}

/// Observability callbacks for traversal steps.
pub trait TraversalObserver: Send + Sync {
    /// Called when a fetch starts.
    fn on_fetch_start(&self, query: &str, request_id: &str);

    /// Called when a fetch completes.
    fn on_fetch_complete(&self, query: &str, request_id: &str, duration_ms: f64, status_code: u16);

    /// Called when a fetch fails.
    fn on_fetch_error(&self, query: &str, request_id: &str, error: &str);

    /// Called when a page has been classified.
    fn on_answer(&self, query: &str, request_id: &str, shape: Shape, related_count: usize);
}

/// No-op implementation of TraversalObserver.
#[derive(Debug, Clone, Default)]
pub struct NoOpTraversalObserver;

impl TraversalObserver for NoOpTraversalObserver {
    fn on_fetch_start(&self, _query: &str, _request_id: &str) {}
    fn on_fetch_complete(&self, _query: &str, _request_id: &str, _duration_ms: f64, _status_code: u16) {}
    fn on_fetch_error(&self, _query: &str, _request_id: &str, _error: &str) {}
    fn on_answer(&self, _query: &str, _request_id: &str, _shape: Shape, _related_count: usize) {}
}

/// Observer that reports traversal steps through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingTraversalObserver;

impl TraversalObserver for LoggingTraversalObserver {
    fn on_fetch_start(&self, query: &str, request_id: &str) {
        debug!(query, request_id, "fetch started");
    }

    fn on_fetch_complete(&self, query: &str, request_id: &str, duration_ms: f64, status_code: u16) {
        debug!(query, request_id, duration_ms, status_code, "fetch completed");
    }

    fn on_fetch_error(&self, query: &str, request_id: &str, error: &str) {
        warn!(query, request_id, error, "fetch failed");
    }

    fn on_answer(&self, query: &str, request_id: &str, shape: Shape, related_count: usize) {
        info!(query, request_id, %shape, related_count, "page classified");
    }
}
