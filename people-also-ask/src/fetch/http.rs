//! `reqwest` implementation of [`SearchFetcher`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Instant;
use tracing::debug;

use super::protocols::{FetchResult, SearchFetcher};
use crate::config::FetchConfig;
use crate::errors::{PaaError, Result};

const BODY_SNIPPET: usize = 200;

/// Fetches search result pages over HTTP.
///
/// One GET per call. Non-2xx responses and transport failures become
/// [`PaaError::Fetch`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpSearchFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpSearchFetcher {
    /// Builds a fetcher from `config`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| PaaError::Config(format!("invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| PaaError::Config(format!("invalid value for header '{key}': {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| PaaError::Config(format!("cannot build http client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl SearchFetcher for HttpSearchFetcher {
    async fn fetch(&self, query: &str, domain: &str) -> Result<FetchResult> {
        let url = self.config.search_url(query, domain)?;
        let started = Instant::now();
        debug!(query, %url, "requesting results page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PaaError::fetch(query, url.as_str(), e.to_string(), None))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| PaaError::fetch(query, url.as_str(), e.to_string(), Some(status)))?;

        let page = FetchResult {
            status_code: status,
            text,
            final_url,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        ensure_success(query, url.as_str(), page)
    }
}

fn ensure_success(query: &str, url: &str, page: FetchResult) -> Result<FetchResult> {
    if page.is_success() {
        return Ok(page);
    }
    let snippet: String = page.text.chars().take(BODY_SNIPPET).collect();
    Err(PaaError::fetch(
        query,
        url,
        format!("unexpected status {}: {snippet}", page.status_code),
        Some(page.status_code),
    ))
}
